//! Style Validator - Rule/Policy Separation
//!
//! Rules are pure functions over `(&LayoutSpec, &ThemeTokens)` producing
//! structured issues. Aggregation maps failing rule categories to fixed
//! score deductions from one shared weight table, so the layout-only and
//! build-result scoring paths cannot drift apart. Design-rule violations
//! are never errors: a bad slide is reported via a low score and explicit
//! issues, never via a failure.

use serde::{Deserialize, Serialize};

use crate::color::{contrast_ratio, ensure_contrast};
use crate::geometry::LayoutSpec;
use crate::theme::ThemeTokens;

pub const MIN_CONTRAST_RATIO: f64 = 4.5;
pub const MIN_FONT_SIZE: f64 = 12.0;
pub const PASSING_SCORE: f64 = 70.0;
const DENSITY_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Typography,
    Color,
    Layout,
    Accessibility,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    Major,
    Minor,
}

/// A classified design-rule finding with optional remediation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub category: IssueCategory,
    pub message: String,
    pub severity: IssueSeverity,
    #[serde(default)]
    pub fix: Option<String>,
}

/// Letter grade derived purely from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscores {
    pub accessibility: f64,
    pub typography: f64,
    pub color_harmony: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Quality score, always clamped to [0, 100].
    pub score: f64,
    pub grade: Grade,
    pub issues: Vec<StyleIssue>,
    pub suggestions: Vec<String>,
    pub subscores: Subscores,
    pub valid: bool,
}

/// Output of a single rule check.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub valid: bool,
    pub issues: Vec<StyleIssue>,
}

impl RuleOutcome {
    /// A rule fails on any non-informational issue. Informational findings
    /// (the reading-order heuristic) are surfaced but never cost points.
    fn from_issues(issues: Vec<StyleIssue>) -> Self {
        let valid = issues.iter().all(|i| i.issue_type == IssueType::Info);
        Self { valid, issues }
    }
}

/// The five rule categories and their score weights. One deduction per
/// failing category, regardless of how many violations it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    SafeMargins,
    Overlap,
    Hierarchy,
    Spacing,
    Accessibility,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 5] = [
        RuleCategory::SafeMargins,
        RuleCategory::Overlap,
        RuleCategory::Hierarchy,
        RuleCategory::Spacing,
        RuleCategory::Accessibility,
    ];

    pub fn weight(self) -> f64 {
        match self {
            RuleCategory::SafeMargins => 15.0,
            RuleCategory::Overlap => 20.0,
            RuleCategory::Hierarchy => 10.0,
            RuleCategory::Spacing => 10.0,
            RuleCategory::Accessibility => 15.0,
        }
    }

    fn check(self, spec: &LayoutSpec, theme: &ThemeTokens) -> RuleOutcome {
        match self {
            RuleCategory::SafeMargins => check_safe_margins(spec, theme),
            RuleCategory::Overlap => check_overlapping_elements(spec, theme),
            RuleCategory::Hierarchy => check_typography_hierarchy(spec, theme),
            RuleCategory::Spacing => check_spacing_consistency(spec, theme),
            RuleCategory::Accessibility => check_accessibility(spec, theme),
        }
    }
}

/// Deduction per upstream build issue, shared with the layout aggregator's
/// severity taxonomy.
pub fn severity_weight(severity: IssueSeverity) -> f64 {
    match severity {
        IssueSeverity::Critical => 25.0,
        IssueSeverity::Major => 10.0,
        IssueSeverity::Minor => 5.0,
    }
}

/// Every element must keep `safeMargin` distance from the slide edge.
/// Violations are reported per element index, never auto-corrected.
pub fn check_safe_margins(spec: &LayoutSpec, theme: &ThemeTokens) -> RuleOutcome {
    let margin = theme.layout.safe_margin;
    let mut issues = vec![];
    for (i, el) in spec.content.iter().enumerate() {
        let frame = el.frame();
        if frame.x < margin
            || frame.y < margin
            || frame.right() > spec.slide_width - margin
            || frame.bottom() > spec.slide_height - margin
        {
            issues.push(StyleIssue {
                issue_type: IssueType::Warning,
                category: IssueCategory::Layout,
                message: format!("Element {i} breaches the safe margin"),
                severity: IssueSeverity::Major,
                fix: Some(format!(
                    "Keep content at least {margin:.2}\" from the slide edge"
                )),
            });
        }
    }
    RuleOutcome::from_issues(issues)
}

/// Pairwise AABB intersection over all content boxes, one issue per
/// colliding pair.
pub fn check_overlapping_elements(spec: &LayoutSpec, _theme: &ThemeTokens) -> RuleOutcome {
    let mut issues = vec![];
    for i in 0..spec.content.len() {
        for j in (i + 1)..spec.content.len() {
            if spec.content[i].frame().overlaps(spec.content[j].frame()) {
                issues.push(StyleIssue {
                    issue_type: IssueType::Warning,
                    category: IssueCategory::Layout,
                    message: format!("Elements {i} and {j} overlap"),
                    severity: IssueSeverity::Major,
                    fix: Some("Increase spacing or move one of the elements".to_string()),
                });
            }
        }
    }
    RuleOutcome::from_issues(issues)
}

/// Flags a flat type scale, a missing title-sized element, and competing
/// title-sized elements. Slides without text pass trivially.
pub fn check_typography_hierarchy(spec: &LayoutSpec, theme: &ThemeTokens) -> RuleOutcome {
    let sizes: Vec<f64> = spec.text_blocks().map(|(_, t)| t.font_size).collect();
    if sizes.is_empty() {
        return RuleOutcome { valid: true, issues: vec![] };
    }

    let mut issues = vec![];

    if sizes.len() > 1 && sizes.iter().all(|s| *s == sizes[0]) {
        issues.push(StyleIssue {
            issue_type: IssueType::Warning,
            category: IssueCategory::Typography,
            message: "All text uses a single font size; the slide has no hierarchy".to_string(),
            severity: IssueSeverity::Major,
            fix: Some("Differentiate heading and body font sizes".to_string()),
        });
    }

    let title_sized = sizes.iter().filter(|s| **s >= theme.typography.h1).count();
    if title_sized == 0 {
        issues.push(StyleIssue {
            issue_type: IssueType::Warning,
            category: IssueCategory::Typography,
            message: "No title-sized text anchors the hierarchy".to_string(),
            severity: IssueSeverity::Minor,
            fix: Some(format!(
                "Use at least {}pt for the slide title",
                theme.typography.h1
            )),
        });
    } else if title_sized > 2 {
        issues.push(StyleIssue {
            issue_type: IssueType::Warning,
            category: IssueCategory::Typography,
            message: format!("{title_sized} title-sized elements compete for hierarchy"),
            severity: IssueSeverity::Minor,
            fix: Some("Reserve title sizing for at most two elements".to_string()),
        });
    }

    RuleOutcome::from_issues(issues)
}

/// Vertical gaps between position-sorted elements should cluster around
/// their mean; any gap deviating by more than the `xs` spacing token flags
/// the slide once. Aggregate reporting (one issue regardless of how many
/// gaps deviate) is deliberate and mirrors the shipped behavior; overlap
/// reporting is per-pair. Pending product confirmation.
pub fn check_spacing_consistency(spec: &LayoutSpec, theme: &ThemeTokens) -> RuleOutcome {
    let mut tops: Vec<(f64, f64)> = spec
        .content
        .iter()
        .map(|el| (el.frame().y, el.frame().bottom()))
        .collect();
    tops.sort_by(|a, b| a.0.total_cmp(&b.0));

    let gaps: Vec<f64> = tops.windows(2).map(|w| w[1].0 - w[0].1).collect();
    if gaps.len() <= 1 {
        return RuleOutcome { valid: true, issues: vec![] };
    }

    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    let inconsistent = gaps.iter().any(|g| (g - mean).abs() > theme.spacing.xs);

    let issues = if inconsistent {
        vec![StyleIssue {
            issue_type: IssueType::Warning,
            category: IssueCategory::Layout,
            message: "Vertical spacing between elements is inconsistent".to_string(),
            severity: IssueSeverity::Minor,
            fix: Some("Even out the vertical gaps between elements".to_string()),
        }]
    } else {
        vec![]
    };
    RuleOutcome::from_issues(issues)
}

/// Legibility checks: minimum font size, minimum contrast against the theme
/// background, and a reading-order heuristic. The reading-order finding is
/// informational only; it also fires on legitimate visual-emphasis layouts.
pub fn check_accessibility(spec: &LayoutSpec, theme: &ThemeTokens) -> RuleOutcome {
    let mut issues = vec![];

    for (i, text) in spec.text_blocks() {
        if text.font_size < MIN_FONT_SIZE {
            issues.push(StyleIssue {
                issue_type: IssueType::Warning,
                category: IssueCategory::Accessibility,
                message: format!(
                    "Element {i} text is {}pt, below the {MIN_FONT_SIZE}pt legibility floor",
                    text.font_size
                ),
                severity: IssueSeverity::Major,
                fix: Some(format!("Raise the font size to at least {MIN_FONT_SIZE}pt")),
            });
        }

        let ratio = contrast_ratio(&text.color, &theme.palette.background);
        if ratio < MIN_CONTRAST_RATIO {
            let remedy = ensure_contrast(&text.color, &theme.palette.background, MIN_CONTRAST_RATIO);
            // Best-effort adjustments that still miss the target get a
            // generic remedy, not a concrete color that also fails.
            let fix = if remedy.ratio >= MIN_CONTRAST_RATIO {
                format!("Use #{} for this text instead", remedy.color)
            } else {
                "Darken the text or lighten the background".to_string()
            };
            issues.push(StyleIssue {
                issue_type: IssueType::Warning,
                category: IssueCategory::Color,
                message: format!(
                    "Element {i} contrast {ratio:.1}:1 is below {MIN_CONTRAST_RATIO}:1"
                ),
                severity: IssueSeverity::Major,
                fix: Some(fix),
            });
        }
    }

    if !matches_reading_order(spec, theme) {
        issues.push(StyleIssue {
            issue_type: IssueType::Info,
            category: IssueCategory::Accessibility,
            message: "Content order may not match visual reading order".to_string(),
            severity: IssueSeverity::Minor,
            fix: None,
        });
    }

    RuleOutcome::from_issues(issues)
}

/// Row-major reading order: elements whose y positions sit within the `sm`
/// spacing token of a row's first element count as one row and are ordered
/// by x. Grouping walks the position-sorted list against each row's anchor,
/// so the comparison stays a total order no matter how y values cluster.
fn matches_reading_order(spec: &LayoutSpec, theme: &ThemeTokens) -> bool {
    let mut by_position: Vec<usize> = (0..spec.content.len()).collect();
    by_position.sort_by(|&a, &b| {
        let fa = spec.content[a].frame();
        let fb = spec.content[b].frame();
        fa.y.total_cmp(&fb.y).then(fa.x.total_cmp(&fb.x))
    });

    let tolerance = theme.spacing.sm;
    let sort_by_x = |row: &mut Vec<usize>| {
        row.sort_by(|&a, &b| {
            spec.content[a]
                .frame()
                .x
                .total_cmp(&spec.content[b].frame().x)
        });
    };

    let mut order: Vec<usize> = Vec::with_capacity(spec.content.len());
    let mut row: Vec<usize> = vec![];
    let mut anchor_y = 0.0;
    for idx in by_position {
        let y = spec.content[idx].frame().y;
        if !row.is_empty() && y - anchor_y >= tolerance {
            sort_by_x(&mut row);
            order.append(&mut row);
        }
        if row.is_empty() {
            anchor_y = y;
        }
        row.push(idx);
    }
    sort_by_x(&mut row);
    order.append(&mut row);

    order.iter().enumerate().all(|(i, &idx)| i == idx)
}

/// Run all five rules and aggregate: start at 100, deduct each failing
/// category's weight once, clamp to [0, 100].
pub fn validate_layout(spec: &LayoutSpec, theme: &ThemeTokens) -> ValidationResult {
    let mut score = 100.0;
    let mut issues = vec![];

    for category in RuleCategory::ALL {
        let outcome = category.check(spec, theme);
        if !outcome.valid {
            score -= category.weight();
        }
        issues.extend(outcome.issues);
    }

    finish(score, issues, spec.content.len())
}

/// Second-level aggregator: layout validation plus upstream build metadata,
/// folded in at the shared per-severity weights.
pub fn validate_build(
    spec: &LayoutSpec,
    theme: &ThemeTokens,
    build_issues: &[StyleIssue],
) -> ValidationResult {
    let layout = validate_layout(spec, theme);
    let mut score = layout.score;
    let mut issues = layout.issues;

    for issue in build_issues {
        score -= severity_weight(issue.severity);
        issues.push(issue.clone());
    }

    finish(score, issues, spec.content.len())
}

fn finish(score: f64, issues: Vec<StyleIssue>, element_count: usize) -> ValidationResult {
    let score = score.clamp(0.0, 100.0);
    let suggestions = build_suggestions(&issues, element_count);
    let subscores = Subscores {
        accessibility: subscore(&issues, IssueCategory::Accessibility),
        typography: subscore(&issues, IssueCategory::Typography),
        color_harmony: subscore(&issues, IssueCategory::Color),
    };
    let has_critical = issues.iter().any(|i| i.severity == IssueSeverity::Critical);
    ValidationResult {
        score,
        grade: Grade::from_score(score),
        valid: score >= PASSING_SCORE && !has_critical,
        issues,
        suggestions,
        subscores,
    }
}

fn subscore(issues: &[StyleIssue], category: IssueCategory) -> f64 {
    let count = issues.iter().filter(|i| i.category == category).count();
    (100.0 - 25.0 * count as f64).clamp(0.0, 100.0)
}

fn build_suggestions(issues: &[StyleIssue], element_count: usize) -> Vec<String> {
    let mentions = |needle: &str| {
        issues
            .iter()
            .any(|i| i.message.to_lowercase().contains(needle))
    };

    let mut suggestions = vec![];
    if mentions("overlap") {
        suggestions.push(
            "Increase spacing between elements or move them into separate regions".to_string(),
        );
    }
    if mentions("margin") {
        suggestions.push("Pull content inside the safe margin".to_string());
    }
    if mentions("hierarchy") {
        suggestions
            .push("Differentiate heading and body font sizes to establish hierarchy".to_string());
    }
    if mentions("contrast") {
        suggestions.push(
            "Darken the text or lighten the background to reach a 4.5:1 contrast ratio"
                .to_string(),
        );
    }
    if element_count > DENSITY_LIMIT {
        suggestions.push(format!(
            "Slide carries {element_count} elements; consider splitting the content across slides"
        ));
    }
    suggestions
}
