//! SlideForge CLI - Bridge interface for the content orchestrator
//!
//! Commands: theme, compose, build, contrast
//! Outputs JSON to stdout
//! Returns exit code 2 when the quality gate fails

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use slideforge_core::{
    color::validate_accessibility,
    pipeline::{BuildRequest, ContentRequest},
    theme::ThemeTokens,
    Rect, SlidePipeline,
};

#[derive(Parser)]
#[command(name = "slideforge-cli")]
#[command(about = "SlideForge CLI - Slide Layout & Style Validation Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a fully-resolved theme JSON file; defaults to the built-in theme
    #[arg(short, long)]
    theme: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved theme tokens
    Theme,

    /// Compose a content request into a positioned layout
    Compose {
        /// JSON payload (ContentRequest)
        #[arg(short, long)]
        payload: String,

        /// Target region as "x,y,width,height" in inches
        #[arg(short, long)]
        region: String,
    },

    /// Compose, validate, and fingerprint one slide
    Build {
        /// JSON payload (BuildRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// WCAG contrast report for a foreground/background pair
    Contrast {
        #[arg(short, long)]
        foreground: String,

        #[arg(short, long)]
        background: String,
    },
}

fn load_theme(path: Option<&PathBuf>) -> Result<ThemeTokens, String> {
    match path {
        None => Ok(ThemeTokens::default()),
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .map_err(|e| format!("Failed to read theme file: {e}"))?;
            serde_json::from_str(&content).map_err(|e| format!("Invalid theme JSON: {e}"))
        }
    }
}

fn parse_region(raw: &str) -> Result<Rect, String> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("Invalid region: {e}"))?;
    if parts.len() != 4 {
        return Err("Region must be x,y,width,height".to_string());
    }
    if parts.iter().any(|v| !v.is_finite()) || parts[2] < 0.0 || parts[3] < 0.0 {
        return Err("Region dimensions must be finite and non-negative".to_string());
    }
    Ok(Rect::new(parts[0], parts[1], parts[2], parts[3]))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let theme = match load_theme(cli.theme.as_ref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!(r#"{{"error": "{e}"}}"#);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = SlidePipeline::new(theme);

    match cli.command {
        Commands::Theme => {
            println!("{}", serde_json::to_string_pretty(pipeline.theme()).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Compose { payload, region } => {
            let content: ContentRequest = match serde_json::from_str(&payload) {
                Ok(c) => c,
                Err(e) => {
                    println!(r#"{{"error": "Invalid payload: {e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };
            let region = match parse_region(&region) {
                Ok(r) => r,
                Err(e) => {
                    println!(r#"{{"error": "{e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            let layout = pipeline.compose(&content, &region);
            println!("{}", serde_json::to_string_pretty(&layout).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Build { payload } => {
            let request: BuildRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => {
                    println!(r#"{{"error": "Invalid payload: {e}"}}"#);
                    return ExitCode::FAILURE;
                }
            };

            match pipeline.build(&request) {
                Ok(result) => {
                    let passed = result.validation.valid;
                    println!("{}", serde_json::to_string_pretty(&result).unwrap());
                    if passed {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(2) // Quality gate failure
                    }
                }
                Err(e) => {
                    println!(r#"{{"error": "{e}"}}"#);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Contrast { foreground, background } => {
            let report = validate_accessibility(&foreground, &background);
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
            if report.wcag_aa {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
    }
}
