//! Theme Tokens - Fully Resolved Design Contracts
//!
//! Themes arrive fully resolved from upstream: no lookups or fallback chains
//! happen inside the engine. Serde defaults exist so a partial theme JSON
//! still deserializes into a complete token set.

use serde::{Deserialize, Serialize};

/// Complete token set for one deck: colors, type scale, spacing scale, and
/// canvas constants. Read-only during composition and validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTokens {
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub typography: TypeScale,
    #[serde(default)]
    pub spacing: SpacingScale,
    #[serde(default)]
    pub layout: LayoutConstants,
}

/// Core brand and neutral colors, 6-digit hex without `#`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_secondary")]
    pub secondary: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_surface")]
    pub surface: String,
    #[serde(default = "default_text_primary")]
    pub text_primary: String,
    #[serde(default = "default_text_secondary")]
    pub text_secondary: String,
    #[serde(default = "default_border_light")]
    pub border_light: String,
    #[serde(default = "default_border_medium")]
    pub border_medium: String,
    #[serde(default)]
    pub semantic: SemanticColors,
}

fn default_primary() -> String { "1E40AF".into() }
fn default_secondary() -> String { "64748B".into() }
fn default_accent() -> String { "F59E0B".into() }
fn default_background() -> String { "FFFFFF".into() }
fn default_surface() -> String { "F1F5F9".into() }
fn default_text_primary() -> String { "1F2937".into() }
fn default_text_secondary() -> String { "6B7280".into() }
fn default_border_light() -> String { "E5E7EB".into() }
fn default_border_medium() -> String { "D1D5DB".into() }

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            accent: default_accent(),
            background: default_background(),
            surface: default_surface(),
            text_primary: default_text_primary(),
            text_secondary: default_text_secondary(),
            border_light: default_border_light(),
            border_medium: default_border_medium(),
            semantic: SemanticColors::default(),
        }
    }
}

/// Semantic status colors used by callout composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticColors {
    #[serde(default = "default_info")]
    pub info: String,
    #[serde(default = "default_warning")]
    pub warning: String,
    #[serde(default = "default_success")]
    pub success: String,
    #[serde(default = "default_error")]
    pub error: String,
    #[serde(default = "default_tip")]
    pub tip: String,
}

fn default_info() -> String { "3B82F6".into() }
fn default_warning() -> String { "F59E0B".into() }
fn default_success() -> String { "10B981".into() }
fn default_error() -> String { "EF4444".into() }
fn default_tip() -> String { "8B5CF6".into() }

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            info: default_info(),
            warning: default_warning(),
            success: default_success(),
            error: default_error(),
            tip: default_tip(),
        }
    }
}

/// Font sizes per role, in points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScale {
    #[serde(default = "default_h1")]
    pub h1: f64,
    #[serde(default = "default_h2")]
    pub h2: f64,
    #[serde(default = "default_body")]
    pub body: f64,
    #[serde(default = "default_caption")]
    pub caption: f64,
}

fn default_h1() -> f64 { 32.0 }
fn default_h2() -> f64 { 24.0 }
fn default_body() -> f64 { 16.0 }
fn default_caption() -> f64 { 12.0 }

impl Default for TypeScale {
    fn default() -> Self {
        Self {
            h1: default_h1(),
            h2: default_h2(),
            body: default_body(),
            caption: default_caption(),
        }
    }
}

/// Spacing steps in inches, xs through xl.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingScale {
    #[serde(default = "default_xs")]
    pub xs: f64,
    #[serde(default = "default_sm")]
    pub sm: f64,
    #[serde(default = "default_md")]
    pub md: f64,
    #[serde(default = "default_lg")]
    pub lg: f64,
    #[serde(default = "default_xl")]
    pub xl: f64,
}

fn default_xs() -> f64 { 0.1 }
fn default_sm() -> f64 { 0.2 }
fn default_md() -> f64 { 0.3 }
fn default_lg() -> f64 { 0.5 }
fn default_xl() -> f64 { 0.8 }

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            xs: default_xs(),
            sm: default_sm(),
            md: default_md(),
            lg: default_lg(),
            xl: default_xl(),
        }
    }
}

/// Canvas constants: 16:9 widescreen in inches plus the safe margin every
/// element must keep from the slide edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConstants {
    #[serde(default = "default_slide_width")]
    pub slide_width: f64,
    #[serde(default = "default_slide_height")]
    pub slide_height: f64,
    #[serde(default = "default_safe_margin")]
    pub safe_margin: f64,
}

fn default_slide_width() -> f64 { 13.333 }
fn default_slide_height() -> f64 { 7.5 }
fn default_safe_margin() -> f64 { 0.3 }

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            slide_width: default_slide_width(),
            slide_height: default_slide_height(),
            safe_margin: default_safe_margin(),
        }
    }
}
