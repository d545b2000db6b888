//! Color Science - WCAG Luminance, Contrast, and Palette Tools
//!
//! Every function here is total: malformed hex input collapses to black with
//! a logged warning instead of failing, because upstream color strings come
//! from AI-generated themes and free-form user input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parse a 6-digit hex color, with or without a leading `#`.
///
/// Malformed input returns black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&digits[0..2], 16),
            u8::from_str_radix(&digits[2..4], 16),
            u8::from_str_radix(&digits[4..6], 16),
        ) {
            return Rgb { r, g, b };
        }
    }
    log::warn!("malformed hex color {hex:?}, substituting black");
    Rgb { r: 0, g: 0, b: 0 }
}

/// Encode RGB channels as uppercase 6-digit hex (no `#`).
///
/// Channels are clamped to [0, 255] before encoding.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    let clamp = |c: i32| c.clamp(0, 255) as u8;
    format!("{:02X}{:02X}{:02X}", clamp(r), clamp(g), clamp(b))
}

/// WCAG 2.1 relative luminance of a hex color, in [0, 1].
///
/// Each channel is normalized, gamma-corrected through the piecewise sRGB
/// transfer function, then combined as 0.2126 R + 0.7152 G + 0.0722 B.
pub fn luminance(hex: &str) -> f64 {
    let rgb = hex_to_rgb(hex);
    let linear = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(rgb.r) + 0.7152 * linear(rgb.g) + 0.0722 * linear(rgb.b)
}

/// WCAG 2.1 contrast ratio between two colors, in [1, 21].
///
/// Symmetric: argument order never matters.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Multiply each channel by `1 + pct/100`, clamped to [0, 255].
pub fn lighten(hex: &str, pct: f64) -> String {
    scale(hex, 1.0 + pct / 100.0)
}

/// Multiply each channel by `1 - pct/100`, clamped to [0, 255].
pub fn darken(hex: &str, pct: f64) -> String {
    scale(hex, 1.0 - pct / 100.0)
}

fn scale(hex: &str, factor: f64) -> String {
    let rgb = hex_to_rgb(hex);
    let adj = |c: u8| (f64::from(c) * factor).round() as i32;
    rgb_to_hex(adj(rgb.r), adj(rgb.g), adj(rgb.b))
}

/// Result of a contrast-satisfying color adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastFix {
    /// Possibly-adjusted foreground color, uppercase hex, no `#`.
    pub color: String,
    /// Contrast ratio of `color` against the background.
    pub ratio: f64,
    pub adjusted: bool,
}

/// Adjust `fg` until it reaches `min_ratio` contrast against `bg`.
///
/// If the ratio already passes, the color is returned unchanged. Otherwise
/// the foreground is scaled toward white (dark background) or black (light
/// background) in steps of 5%, stopping at the first step that satisfies
/// `min_ratio` or after 100 steps. Best-effort: `adjusted` is true once any
/// scaling occurred, even when the budget ran out short of the target.
pub fn ensure_contrast(fg: &str, bg: &str, min_ratio: f64) -> ContrastFix {
    let rgb = hex_to_rgb(fg);
    let mut color = rgb_to_hex(i32::from(rgb.r), i32::from(rgb.g), i32::from(rgb.b));
    let mut ratio = contrast_ratio(&color, bg);
    if ratio >= min_ratio {
        return ContrastFix { color, ratio, adjusted: false };
    }

    let toward_white = luminance(bg) < 0.5;
    let mut adjusted = false;
    for _ in 0..100 {
        color = if toward_white {
            lighten(&color, 5.0)
        } else {
            darken(&color, 5.0)
        };
        adjusted = true;
        ratio = contrast_ratio(&color, bg);
        if ratio >= min_ratio {
            break;
        }
    }
    ContrastFix { color, ratio, adjusted }
}

/// Tonal ladder around a base color: keys 50..=900, with 500 equal to the
/// base. Lighter stops at 40/30/20/10/5 percent, darker at 10/20/30/40.
pub fn generate_palette(base: &str) -> BTreeMap<u16, String> {
    let rgb = hex_to_rgb(base);
    let normalized = rgb_to_hex(i32::from(rgb.r), i32::from(rgb.g), i32::from(rgb.b));
    let mut ladder = BTreeMap::new();
    ladder.insert(50, lighten(&normalized, 40.0));
    ladder.insert(100, lighten(&normalized, 30.0));
    ladder.insert(200, lighten(&normalized, 20.0));
    ladder.insert(300, lighten(&normalized, 10.0));
    ladder.insert(400, lighten(&normalized, 5.0));
    ladder.insert(500, normalized.clone());
    ladder.insert(600, darken(&normalized, 10.0));
    ladder.insert(700, darken(&normalized, 20.0));
    ladder.insert(800, darken(&normalized, 30.0));
    ladder.insert(900, darken(&normalized, 40.0));
    ladder
}

/// WCAG conformance report for a foreground/background pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    pub wcag_aa: bool,
    pub wcag_aaa: bool,
    pub ratio: f64,
    pub level: String,
}

/// AA threshold 4.5, AAA threshold 7.0 (normal text).
pub fn validate_accessibility(fg: &str, bg: &str) -> AccessibilityReport {
    let ratio = contrast_ratio(fg, bg);
    let wcag_aa = ratio >= 4.5;
    let wcag_aaa = ratio >= 7.0;
    let level = if wcag_aaa {
        "AAA"
    } else if wcag_aa {
        "AA"
    } else {
        "Fail"
    };
    AccessibilityReport {
        wcag_aa,
        wcag_aaa,
        ratio,
        level: level.to_string(),
    }
}
