//! SlideForge Core - Slide Layout Composition & Style Validation Engine
//!
//! # The Five Laws (Non-Negotiable)
//! 1. Geometry Is Truth
//! 2. Themes Are Contracts
//! 3. Validation Is Protective
//! 4. Deterministic Output
//! 5. Issues Inform, Never Abort

pub mod color;
pub mod compose;
pub mod fingerprint;
pub mod geometry;
pub mod pipeline;
pub mod theme;
pub mod validate;

pub use compose::{
    CalloutKind, CalloutSpec, CardSpec, ChartOptions, ChartSeries, ColorScheme, TableOptions,
    TableSpec, TimelineEvent, TimelineOptions,
};
pub use fingerprint::{build_fingerprint, canonical_json, layout_fingerprint};
pub use geometry::{Element, LayoutSpec, Rect, Shape, TextAlign, TextBlock};
pub use pipeline::{BuildRequest, ContentRequest, PipelineError, SlideBuildResult, SlidePipeline};
pub use theme::ThemeTokens;
pub use validate::{
    validate_build, validate_layout, Grade, IssueCategory, IssueSeverity, IssueType, StyleIssue,
    ValidationResult,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
