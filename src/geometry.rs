//! Geometry Primitives - Positioned Rectangles and Text Blocks
//!
//! Pure data. Positions are slide-relative inches. Negative dimensions and
//! non-finite numbers are upstream composition bugs and fail loudly in
//! debug builds; they are never silently clamped.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in slide coordinates (inches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        debug_assert!(
            x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite(),
            "non-finite rect component: ({x}, {y}, {width}, {height})"
        );
        debug_assert!(
            width >= 0.0 && height >= 0.0,
            "negative rect dimensions: {width}x{height}"
        );
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict AABB intersection: rectangles that merely share an edge do
    /// not overlap. Symmetric by construction.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }
}

/// Horizontal text alignment inside a text block's frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A filled (or outlined) shape with no text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub frame: Rect,
    /// Fill color as 6-digit hex, no `#`.
    #[serde(default)]
    pub fill: Option<String>,
    /// Outline color as 6-digit hex, no `#`.
    #[serde(default)]
    pub line: Option<String>,
}

/// A positioned run of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub frame: Rect,
    pub text: String,
    /// Point size. Invariant: > 0 (debug-asserted via `new`).
    pub font_size: f64,
    /// Text color as 6-digit hex, no `#`.
    pub color: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub align: TextAlign,
}

impl TextBlock {
    pub fn new(frame: Rect, text: impl Into<String>, font_size: f64, color: impl Into<String>) -> Self {
        debug_assert!(font_size > 0.0, "non-positive font size: {font_size}");
        Self {
            frame,
            text: text.into(),
            font_size,
            color: color.into(),
            bold: false,
            italic: false,
            align: TextAlign::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

/// A positioned visual element. The `kind` tag lets validators distinguish
/// text-bearing elements from pure shapes with exhaustive matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Shape(Shape),
    Text(TextBlock),
}

impl Element {
    pub fn frame(&self) -> &Rect {
        match self {
            Element::Shape(s) => &s.frame,
            Element::Text(t) => &t.frame,
        }
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Element::Shape(_) => None,
            Element::Text(t) => Some(t),
        }
    }
}

/// The complete set of positioned elements for one slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpec {
    pub slide_width: f64,
    pub slide_height: f64,
    #[serde(default)]
    pub content: Vec<Element>,
}

impl LayoutSpec {
    pub fn new(slide_width: f64, slide_height: f64) -> Self {
        debug_assert!(
            slide_width > 0.0 && slide_height > 0.0,
            "non-positive canvas: {slide_width}x{slide_height}"
        );
        Self {
            slide_width,
            slide_height,
            content: vec![],
        }
    }

    pub fn push_shape(&mut self, frame: Rect, fill: Option<String>) {
        self.content.push(Element::Shape(Shape { frame, fill, line: None }));
    }

    pub fn push_text(&mut self, block: TextBlock) {
        self.content.push(Element::Text(block));
    }

    /// Text-bearing elements paired with their content index.
    pub fn text_blocks(&self) -> impl Iterator<Item = (usize, &TextBlock)> {
        self.content
            .iter()
            .enumerate()
            .filter_map(|(i, el)| el.as_text().map(|t| (i, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(1.0, 1.0, 2.0, 2.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn disjoint_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(5.0, 5.0, 1.0, 1.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn identical_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn element_kind_tag_round_trips() {
        let el = Element::Text(TextBlock::new(
            Rect::new(1.0, 1.0, 4.0, 0.5),
            "Hello",
            18.0,
            "1F2937",
        ));
        let json = serde_json::to_string(&el).unwrap();
        assert!(json.contains(r#""kind":"text""#));
        let back: Element = serde_json::from_str(&json).unwrap();
        assert!(back.as_text().is_some());
    }

    #[test]
    fn text_blocks_skips_shapes() {
        let mut spec = LayoutSpec::new(13.333, 7.5);
        spec.push_shape(Rect::new(0.5, 0.5, 1.0, 1.0), Some("FFFFFF".into()));
        spec.push_text(TextBlock::new(Rect::new(2.0, 0.5, 3.0, 0.5), "t", 12.0, "000000"));
        let texts: Vec<_> = spec.text_blocks().collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, 1);
    }
}
