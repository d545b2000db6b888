//! Layout Composer - Content Requests to Positioned Elements
//!
//! Each composer maps a content description plus a target region into a
//! finished `LayoutSpec`. Composers never fail: empty collections produce a
//! valid near-empty layout, and downstream validation flags sparseness as a
//! content issue rather than a composition error.

use serde::{Deserialize, Serialize};

use crate::color::{darken, lighten};
use crate::geometry::{Element, LayoutSpec, Rect, Shape, TextAlign, TextBlock};
use crate::theme::ThemeTokens;

const LINE_THICKNESS: f64 = 0.03;
const MARKER_SIZE: f64 = 0.16;
const TITLE_HEIGHT: f64 = 0.3;
const DATE_HEIGHT: f64 = 0.25;
const VERTICAL_LINE_OFFSET: f64 = 0.4;
const CALLOUT_BAR_WIDTH: f64 = 0.08;
const CARD_BAR_HEIGHT: f64 = 0.06;
const CARD_PADDING: f64 = 0.15;
const TABLE_HEADER_HEIGHT: f64 = 0.4;
const CELL_PADDING: f64 = 0.05;
const LEGEND_HEIGHT: f64 = 0.35;
const SWATCH_SIZE: f64 = 0.15;

/// One event on a timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub milestone: bool,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineOptions {
    #[serde(default = "default_true")]
    pub show_dates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self { show_dates: true }
    }
}

/// One data series of a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Chart series coloring scheme. Selected per configuration, never inferred
/// from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Theme,
    Gradient,
    Monochrome,
    Vibrant,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default)]
    pub scheme: ColorScheme,
    /// Base color for the gradient scheme; defaults to the theme accent.
    #[serde(default)]
    pub base_color: Option<String>,
}

/// Headers plus row data for a smart table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    #[serde(default)]
    pub banded_rows: bool,
}

/// Callout intent, mapped onto the theme's semantic palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    Info,
    Warning,
    Success,
    Error,
    Tip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalloutSpec {
    pub kind: CalloutKind,
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSpec {
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
}

fn empty_spec(theme: &ThemeTokens) -> LayoutSpec {
    LayoutSpec::new(theme.layout.slide_width, theme.layout.slide_height)
}

/// Horizontal timeline: one connecting line at the vertical midpoint of the
/// region, one marker per event at its slot center, titles above the line
/// and dates below. Milestones take the accent color.
pub fn compose_timeline_horizontal(
    events: &[TimelineEvent],
    region: &Rect,
    theme: &ThemeTokens,
    options: &TimelineOptions,
) -> LayoutSpec {
    let mut spec = empty_spec(theme);
    if events.is_empty() {
        return spec;
    }

    let slot = region.width / events.len() as f64;
    let mid_y = region.y + region.height / 2.0;

    spec.push_shape(
        Rect::new(region.x, mid_y - LINE_THICKNESS / 2.0, region.width, LINE_THICKNESS),
        Some(theme.palette.border_medium.clone()),
    );

    for (i, event) in events.iter().enumerate() {
        let slot_x = region.x + slot * i as f64;
        let center_x = slot_x + slot / 2.0;
        let color = event_color(event, theme);

        spec.push_shape(
            Rect::new(center_x - MARKER_SIZE / 2.0, mid_y - MARKER_SIZE / 2.0, MARKER_SIZE, MARKER_SIZE),
            Some(color),
        );

        let text_x = slot_x + theme.spacing.xs / 2.0;
        let text_w = (slot - theme.spacing.xs).max(0.0);
        let mut title = TextBlock::new(
            Rect::new(
                text_x,
                mid_y - MARKER_SIZE / 2.0 - theme.spacing.xs - TITLE_HEIGHT,
                text_w,
                TITLE_HEIGHT,
            ),
            event.title.clone(),
            theme.typography.body,
            theme.palette.text_primary.clone(),
        )
        .align(TextAlign::Center);
        if event.milestone {
            title = title.bold();
        }
        spec.push_text(title);

        if options.show_dates {
            spec.push_text(
                TextBlock::new(
                    Rect::new(
                        text_x,
                        mid_y + MARKER_SIZE / 2.0 + theme.spacing.xs,
                        text_w,
                        DATE_HEIGHT,
                    ),
                    event.date.clone(),
                    theme.typography.caption,
                    theme.palette.text_secondary.clone(),
                )
                .align(TextAlign::Center),
            );
        }
    }

    spec
}

/// Vertical timeline: the connecting line sits at a fixed left offset, one
/// slot per event down the region's height, titles and dates to the right.
pub fn compose_timeline_vertical(
    events: &[TimelineEvent],
    region: &Rect,
    theme: &ThemeTokens,
    options: &TimelineOptions,
) -> LayoutSpec {
    let mut spec = empty_spec(theme);
    if events.is_empty() {
        return spec;
    }

    let slot = region.height / events.len() as f64;
    let line_x = region.x + VERTICAL_LINE_OFFSET;

    spec.push_shape(
        Rect::new(line_x - LINE_THICKNESS / 2.0, region.y, LINE_THICKNESS, region.height),
        Some(theme.palette.border_medium.clone()),
    );

    let text_x = line_x + MARKER_SIZE / 2.0 + theme.spacing.sm;
    let text_w = (region.right() - text_x).max(0.0);

    for (i, event) in events.iter().enumerate() {
        let center_y = region.y + slot * (i as f64 + 0.5);
        let color = event_color(event, theme);

        spec.push_shape(
            Rect::new(line_x - MARKER_SIZE / 2.0, center_y - MARKER_SIZE / 2.0, MARKER_SIZE, MARKER_SIZE),
            Some(color),
        );

        let mut title = TextBlock::new(
            Rect::new(text_x, center_y - TITLE_HEIGHT / 2.0, text_w, TITLE_HEIGHT),
            event.title.clone(),
            theme.typography.body,
            theme.palette.text_primary.clone(),
        );
        if event.milestone {
            title = title.bold();
        }
        spec.push_text(title);

        if options.show_dates {
            spec.push_text(TextBlock::new(
                Rect::new(
                    text_x,
                    center_y + TITLE_HEIGHT / 2.0 + theme.spacing.xs,
                    text_w,
                    DATE_HEIGHT,
                ),
                event.date.clone(),
                theme.typography.caption,
                theme.palette.text_secondary.clone(),
            ));
        }
    }

    spec
}

fn event_color(event: &TimelineEvent, theme: &ThemeTokens) -> String {
    if event.milestone {
        theme.palette.accent.clone()
    } else {
        theme.palette.primary.clone()
    }
}

/// Smart table: distinct header row on a surface background, optional banded
/// body rows, numeric abbreviation, and per-cell alignment auto-detection.
pub fn compose_table(
    table: &TableSpec,
    region: &Rect,
    theme: &ThemeTokens,
    options: &TableOptions,
) -> LayoutSpec {
    let mut spec = empty_spec(theme);
    if table.headers.is_empty() {
        return spec;
    }

    let col_w = region.width / table.headers.len() as f64;

    spec.push_shape(
        Rect::new(region.x, region.y, region.width, TABLE_HEADER_HEIGHT),
        Some(theme.palette.surface.clone()),
    );
    for (c, header) in table.headers.iter().enumerate() {
        spec.push_text(
            TextBlock::new(
                cell_frame(region, c, col_w, region.y, TABLE_HEADER_HEIGHT),
                header.clone(),
                theme.typography.body,
                theme.palette.text_primary.clone(),
            )
            .bold()
            .align(TextAlign::Center),
        );
    }

    if table.rows.is_empty() {
        return spec;
    }

    let body_top = region.y + TABLE_HEADER_HEIGHT;
    let row_h = (region.height - TABLE_HEADER_HEIGHT) / table.rows.len() as f64;

    for (r, row) in table.rows.iter().enumerate() {
        let row_y = body_top + row_h * r as f64;
        if options.banded_rows && r % 2 == 1 {
            spec.push_shape(
                Rect::new(region.x, row_y, region.width, row_h),
                Some(lighten(&theme.palette.surface, 3.0)),
            );
        }
        for (c, raw) in row.iter().enumerate().take(table.headers.len()) {
            spec.push_text(
                TextBlock::new(
                    cell_frame(region, c, col_w, row_y, row_h),
                    format_cell_value(raw),
                    theme.typography.body,
                    theme.palette.text_primary.clone(),
                )
                .align(detect_alignment(raw)),
            );
        }
    }

    spec
}

fn cell_frame(region: &Rect, col: usize, col_w: f64, y: f64, h: f64) -> Rect {
    Rect::new(
        region.x + col_w * col as f64 + CELL_PADDING,
        y + CELL_PADDING,
        (col_w - 2.0 * CELL_PADDING).max(0.0),
        (h - 2.0 * CELL_PADDING).max(0.0),
    )
}

/// Abbreviate a numeric-looking cell value; non-numeric values pass through.
///
/// `>= 1e6` becomes "X.XM", `>= 1e3` becomes "X.XK", non-integer values are
/// rounded to two decimals. A leading `$` or trailing `%` survives around
/// the abbreviated number.
pub fn format_cell_value(raw: &str) -> String {
    let trimmed = raw.trim();
    let (currency, rest) = match trimmed.strip_prefix('$') {
        Some(rest) => ("$", rest),
        None => ("", trimmed),
    };
    let (digits, percent) = match rest.strip_suffix('%') {
        Some(digits) => (digits, "%"),
        None => (rest, ""),
    };
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>().ok().filter(|v| v.is_finite()) {
        Some(v) => format!("{currency}{}{percent}", abbreviate_number(v)),
        None => trimmed.to_string(),
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| !matches!(c, ',' | '$' | '%')).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn abbreviate_number(v: f64) -> String {
    let magnitude = v.abs();
    if magnitude >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v:.2}")
    }
}

/// Alignment auto-detection: numeric-looking strings go right, short
/// code-like all-caps tokens center, everything else left.
pub fn detect_alignment(raw: &str) -> TextAlign {
    let trimmed = raw.trim();
    if parse_numeric(trimmed).is_some() {
        TextAlign::Right
    } else if !trimmed.is_empty()
        && trimmed.len() <= 5
        && trimmed.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        TextAlign::Center
    } else {
        TextAlign::Left
    }
}

const THEME_EXTRA_ACCENTS: [&str; 5] = ["8B5CF6", "EC4899", "14B8A6", "F97316", "84CC16"];
const VIBRANT_PALETTE: [&str; 8] = [
    "EF4444", "F59E0B", "10B981", "3B82F6", "8B5CF6", "EC4899", "14B8A6", "F97316",
];

/// Assign one color per chart series under the selected scheme.
pub fn chart_series_colors(
    scheme: ColorScheme,
    count: usize,
    base: Option<&str>,
    theme: &ThemeTokens,
) -> Vec<String> {
    match scheme {
        ColorScheme::Theme => {
            let mut pool = vec![
                theme.palette.primary.clone(),
                theme.palette.secondary.clone(),
                theme.palette.accent.clone(),
            ];
            pool.extend(THEME_EXTRA_ACCENTS.iter().map(|c| (*c).to_string()));
            cycle(&pool, count)
        }
        ColorScheme::Vibrant => {
            let pool: Vec<String> = VIBRANT_PALETTE.iter().map(|c| (*c).to_string()).collect();
            cycle(&pool, count)
        }
        ColorScheme::Gradient => {
            brightness_ladder(base.unwrap_or(&theme.palette.accent), count, 40.0)
        }
        ColorScheme::Monochrome => brightness_ladder(&theme.palette.primary, count, 30.0),
    }
}

fn cycle(pool: &[String], count: usize) -> Vec<String> {
    (0..count).map(|i| pool[i % pool.len()].clone()).collect()
}

/// Evenly spaced brightness steps from `+range` percent lighter down to
/// `-range` percent darker.
fn brightness_ladder(base: &str, count: usize, range: f64) -> Vec<String> {
    if count == 0 {
        return vec![];
    }
    if count == 1 {
        return vec![lighten(base, 0.0)];
    }
    (0..count)
        .map(|i| {
            let pct = range - 2.0 * range * i as f64 / (count - 1) as f64;
            if pct >= 0.0 {
                lighten(base, pct)
            } else {
                darken(base, -pct)
            }
        })
        .collect()
}

/// Chart composition: a plot area plus a bottom legend with one swatch and
/// label per series, colored under the selected scheme. The numeric geometry
/// of bars/lines is the file writer's concern; the engine fixes the regions
/// and the series colors.
pub fn compose_chart(
    series: &[ChartSeries],
    region: &Rect,
    theme: &ThemeTokens,
    options: &ChartOptions,
) -> LayoutSpec {
    let mut spec = empty_spec(theme);
    if series.is_empty() {
        return spec;
    }

    let colors = chart_series_colors(
        options.scheme,
        series.len(),
        options.base_color.as_deref(),
        theme,
    );

    let plot_h = (region.height - LEGEND_HEIGHT - theme.spacing.xs).max(0.0);
    spec.push_shape(
        Rect::new(region.x, region.y, region.width, plot_h),
        Some(theme.palette.surface.clone()),
    );

    let legend_y = region.y + plot_h + theme.spacing.xs;
    let slot = region.width / series.len() as f64;
    for (i, s) in series.iter().enumerate() {
        let slot_x = region.x + slot * i as f64;
        spec.push_shape(
            Rect::new(
                slot_x,
                legend_y + (LEGEND_HEIGHT - SWATCH_SIZE) / 2.0,
                SWATCH_SIZE,
                SWATCH_SIZE,
            ),
            Some(colors[i].clone()),
        );
        spec.push_text(TextBlock::new(
            Rect::new(
                slot_x + SWATCH_SIZE + theme.spacing.xs,
                legend_y,
                (slot - SWATCH_SIZE - theme.spacing.xs).max(0.0),
                LEGEND_HEIGHT,
            ),
            s.name.clone(),
            theme.typography.caption,
            theme.palette.text_secondary.clone(),
        ));
    }

    spec
}

/// Callout: background tint, a left accent bar, optional bold title, and
/// body text, all derived from the kind's semantic color.
pub fn compose_callout(
    callout: &CalloutSpec,
    region: &Rect,
    theme: &ThemeTokens,
) -> LayoutSpec {
    let mut spec = empty_spec(theme);
    let semantic = semantic_color(callout.kind, theme);

    spec.content.push(Element::Shape(Shape {
        frame: *region,
        fill: Some(lighten(&semantic, 45.0)),
        line: Some(semantic.clone()),
    }));
    spec.push_shape(
        Rect::new(region.x, region.y, CALLOUT_BAR_WIDTH, region.height),
        Some(semantic),
    );

    let text_x = region.x + CALLOUT_BAR_WIDTH + CARD_PADDING;
    let text_w = (region.width - CALLOUT_BAR_WIDTH - 2.0 * CARD_PADDING).max(0.0);
    let mut cursor = region.y + CARD_PADDING;

    if let Some(title) = &callout.title {
        spec.push_text(
            TextBlock::new(
                Rect::new(text_x, cursor, text_w, TITLE_HEIGHT),
                title.clone(),
                theme.typography.body,
                theme.palette.text_primary.clone(),
            )
            .bold(),
        );
        cursor += TITLE_HEIGHT + theme.spacing.xs;
    }

    spec.push_text(TextBlock::new(
        Rect::new(
            text_x,
            cursor,
            text_w,
            (region.bottom() - CARD_PADDING - cursor).max(0.0),
        ),
        callout.body.clone(),
        theme.typography.body,
        theme.palette.text_primary.clone(),
    ));

    spec
}

fn semantic_color(kind: CalloutKind, theme: &ThemeTokens) -> String {
    let semantic = &theme.palette.semantic;
    match kind {
        CalloutKind::Info => semantic.info.clone(),
        CalloutKind::Warning => semantic.warning.clone(),
        CalloutKind::Success => semantic.success.clone(),
        CalloutKind::Error => semantic.error.clone(),
        CalloutKind::Tip => semantic.tip.clone(),
    }
}

/// Card: surface background, a top accent bar in the primary color, optional
/// bold title, and secondary body text.
pub fn compose_card(card: &CardSpec, region: &Rect, theme: &ThemeTokens) -> LayoutSpec {
    let mut spec = empty_spec(theme);

    spec.push_shape(*region, Some(theme.palette.surface.clone()));
    spec.push_shape(
        Rect::new(region.x, region.y, region.width, CARD_BAR_HEIGHT),
        Some(theme.palette.primary.clone()),
    );

    let text_x = region.x + CARD_PADDING;
    let text_w = (region.width - 2.0 * CARD_PADDING).max(0.0);
    let mut cursor = region.y + CARD_BAR_HEIGHT + CARD_PADDING;

    if let Some(title) = &card.title {
        spec.push_text(
            TextBlock::new(
                Rect::new(text_x, cursor, text_w, TITLE_HEIGHT),
                title.clone(),
                theme.typography.body,
                theme.palette.text_primary.clone(),
            )
            .bold(),
        );
        cursor += TITLE_HEIGHT + theme.spacing.xs;
    }

    spec.push_text(TextBlock::new(
        Rect::new(
            text_x,
            cursor,
            text_w,
            (region.bottom() - CARD_PADDING - cursor).max(0.0),
        ),
        card.body.clone(),
        theme.typography.body,
        theme.palette.text_secondary.clone(),
    ));

    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Element;

    fn theme() -> ThemeTokens {
        ThemeTokens::default()
    }

    fn events(n: usize) -> Vec<TimelineEvent> {
        (0..n)
            .map(|i| TimelineEvent {
                id: format!("e{i}"),
                title: format!("Phase {i}"),
                date: format!("2026-Q{}", i + 1),
                description: None,
                milestone: i == 0,
                status: None,
            })
            .collect()
    }

    fn region() -> Rect {
        Rect::new(1.0, 2.0, 10.0, 3.0)
    }

    #[test]
    fn horizontal_timeline_element_counts() {
        let spec = compose_timeline_horizontal(
            &events(4),
            &region(),
            &theme(),
            &TimelineOptions::default(),
        );
        // 1 line + 4 markers + 4 titles + 4 dates
        assert_eq!(spec.content.len(), 13);
    }

    #[test]
    fn horizontal_timeline_without_dates() {
        let spec = compose_timeline_horizontal(
            &events(3),
            &region(),
            &theme(),
            &TimelineOptions { show_dates: false },
        );
        assert_eq!(spec.content.len(), 7);
    }

    #[test]
    fn milestones_take_accent_color() {
        let t = theme();
        let spec =
            compose_timeline_horizontal(&events(2), &region(), &t, &TimelineOptions::default());
        let markers: Vec<_> = spec
            .content
            .iter()
            .filter_map(|el| match el {
                Element::Shape(s) if s.frame.width == MARKER_SIZE => Some(s.fill.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(markers[0].as_deref(), Some(t.palette.accent.as_str()));
        assert_eq!(markers[1].as_deref(), Some(t.palette.primary.as_str()));
    }

    #[test]
    fn empty_timeline_is_valid_and_empty() {
        let spec =
            compose_timeline_horizontal(&[], &region(), &theme(), &TimelineOptions::default());
        assert!(spec.content.is_empty());
        assert_eq!(spec.slide_width, 13.333);
    }

    #[test]
    fn vertical_timeline_line_spans_region_height() {
        let r = region();
        let spec =
            compose_timeline_vertical(&events(3), &r, &theme(), &TimelineOptions::default());
        let line = spec.content[0].frame();
        assert_eq!(line.y, r.y);
        assert_eq!(line.height, r.height);
        assert!(line.x > r.x && line.x < r.x + 1.0);
    }

    #[test]
    fn vertical_timeline_text_sits_right_of_line() {
        let r = region();
        let spec =
            compose_timeline_vertical(&events(2), &r, &theme(), &TimelineOptions::default());
        let line_x = spec.content[0].frame().x;
        for (_, text) in spec.text_blocks() {
            assert!(text.frame.x > line_x);
        }
    }

    #[test]
    fn table_header_is_bold_on_surface() {
        let t = theme();
        let table = TableSpec {
            headers: vec!["Region".into(), "Revenue".into()],
            rows: vec![vec!["EMEA".into(), "1500000".into()]],
        };
        let spec = compose_table(&table, &region(), &t, &TableOptions::default());
        match &spec.content[0] {
            Element::Shape(s) => assert_eq!(s.fill.as_deref(), Some(t.palette.surface.as_str())),
            Element::Text(_) => panic!("expected header background first"),
        }
        let headers: Vec<_> = spec.text_blocks().take(2).collect();
        assert!(headers.iter().all(|(_, b)| b.bold));
    }

    #[test]
    fn table_abbreviates_and_right_aligns_numbers() {
        let table = TableSpec {
            headers: vec!["Metric".into(), "Value".into()],
            rows: vec![vec!["Revenue".into(), "1500000".into()]],
        };
        let spec = compose_table(&table, &region(), &theme(), &TableOptions::default());
        let cell = spec
            .text_blocks()
            .map(|(_, b)| b)
            .find(|b| b.text == "1.5M")
            .expect("abbreviated cell");
        assert_eq!(cell.align, TextAlign::Right);
    }

    #[test]
    fn banded_rows_add_backgrounds() {
        let table = TableSpec {
            headers: vec!["A".into()],
            rows: vec![vec!["x".into()], vec!["y".into()], vec!["z".into()]],
        };
        let plain = compose_table(&table, &region(), &theme(), &TableOptions::default());
        let banded = compose_table(
            &table,
            &region(),
            &theme(),
            &TableOptions { banded_rows: true },
        );
        // 3 rows -> exactly one odd-indexed band.
        assert_eq!(banded.content.len(), plain.content.len() + 1);
    }

    #[test]
    fn empty_table_is_valid() {
        let table = TableSpec { headers: vec![], rows: vec![] };
        let spec = compose_table(&table, &region(), &theme(), &TableOptions::default());
        assert!(spec.content.is_empty());
    }

    #[test]
    fn cell_formatting_rules() {
        assert_eq!(format_cell_value("1500000"), "1.5M");
        assert_eq!(format_cell_value("2500"), "2.5K");
        assert_eq!(format_cell_value("42"), "42");
        assert_eq!(format_cell_value("3.14159"), "3.14");
        assert_eq!(format_cell_value("Revenue"), "Revenue");
    }

    #[test]
    fn cell_formatting_keeps_currency_and_percent_symbols() {
        assert_eq!(format_cell_value("42%"), "42%");
        assert_eq!(format_cell_value("$42"), "$42");
        assert_eq!(format_cell_value("$1,500,000"), "$1.5M");
        assert_eq!(format_cell_value("12.345%"), "12.35%");
        // Symbol-bearing cells still right-align.
        assert_eq!(detect_alignment("42%"), TextAlign::Right);
        assert_eq!(detect_alignment("$1,500,000"), TextAlign::Right);
    }

    #[test]
    fn alignment_detection_rules() {
        assert_eq!(detect_alignment("1,234.5"), TextAlign::Right);
        assert_eq!(detect_alignment("$42"), TextAlign::Right);
        assert_eq!(detect_alignment("EMEA"), TextAlign::Center);
        assert_eq!(detect_alignment("Q1-A"), TextAlign::Center);
        assert_eq!(detect_alignment("Quarterly revenue"), TextAlign::Left);
        assert_eq!(detect_alignment("TOOLONG"), TextAlign::Left);
    }

    #[test]
    fn theme_scheme_starts_with_brand_colors() {
        let t = theme();
        let colors = chart_series_colors(ColorScheme::Theme, 4, None, &t);
        assert_eq!(colors[0], t.palette.primary);
        assert_eq!(colors[1], t.palette.secondary);
        assert_eq!(colors[2], t.palette.accent);
        assert_eq!(colors[3], THEME_EXTRA_ACCENTS[0]);
    }

    #[test]
    fn vibrant_scheme_cycles_past_eight() {
        let colors = chart_series_colors(ColorScheme::Vibrant, 10, None, &theme());
        assert_eq!(colors.len(), 10);
        assert_eq!(colors[8], colors[0]);
    }

    #[test]
    fn gradient_ladder_runs_light_to_dark() {
        use crate::color::luminance;
        let colors = chart_series_colors(ColorScheme::Gradient, 5, Some("3B82F6"), &theme());
        assert_eq!(colors.len(), 5);
        assert!(luminance(&colors[0]) > luminance(&colors[4]));
    }

    #[test]
    fn monochrome_single_series_is_base() {
        let t = theme();
        let colors = chart_series_colors(ColorScheme::Monochrome, 1, None, &t);
        assert_eq!(colors, vec![t.palette.primary]);
    }

    #[test]
    fn chart_legend_has_swatch_and_label_per_series() {
        let series = vec![
            ChartSeries { name: "2025".into(), labels: vec![], values: vec![], format: None },
            ChartSeries { name: "2026".into(), labels: vec![], values: vec![], format: None },
        ];
        let spec = compose_chart(&series, &region(), &theme(), &ChartOptions::default());
        // plot area + 2 swatches + 2 labels
        assert_eq!(spec.content.len(), 5);
    }

    #[test]
    fn callout_uses_semantic_color() {
        let t = theme();
        let spec = compose_callout(
            &CalloutSpec { kind: CalloutKind::Error, title: Some("Heads up".into()), body: "Budget overrun".into() },
            &region(),
            &t,
        );
        match &spec.content[1] {
            Element::Shape(bar) => {
                assert_eq!(bar.fill.as_deref(), Some(t.palette.semantic.error.as_str()));
            }
            Element::Text(_) => panic!("expected accent bar"),
        }
        match &spec.content[0] {
            Element::Shape(bg) => {
                assert_eq!(bg.fill.as_deref(), Some(lighten(&t.palette.semantic.error, 45.0).as_str()));
                assert_eq!(bg.line.as_deref(), Some(t.palette.semantic.error.as_str()));
            }
            Element::Text(_) => panic!("expected background"),
        }
    }

    #[test]
    fn card_without_title_still_has_body() {
        let spec = compose_card(
            &CardSpec { title: None, body: "Key result".into() },
            &region(),
            &theme(),
        );
        // background + accent bar + body
        assert_eq!(spec.content.len(), 3);
        assert_eq!(spec.text_blocks().count(), 1);
    }
}
