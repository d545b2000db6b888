//! Slide Build Pipeline - Single Entry Point
//!
//! CRITICAL: build always validates the composed layout. No bypass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compose::{
    compose_callout, compose_card, compose_chart, compose_table, compose_timeline_horizontal,
    compose_timeline_vertical, CalloutSpec, CardSpec, ChartOptions, ChartSeries, TableOptions,
    TableSpec, TimelineEvent, TimelineOptions,
};
use crate::fingerprint::{build_fingerprint, layout_fingerprint};
use crate::geometry::{LayoutSpec, Rect};
use crate::theme::ThemeTokens;
use crate::validate::{validate_build, StyleIssue, ValidationResult};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The content to compose into the target region, one variant per visual
/// type the engine knows how to place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentRequest {
    #[serde(rename_all = "camelCase")]
    TimelineHorizontal {
        events: Vec<TimelineEvent>,
        #[serde(default)]
        options: TimelineOptions,
    },
    #[serde(rename_all = "camelCase")]
    TimelineVertical {
        events: Vec<TimelineEvent>,
        #[serde(default)]
        options: TimelineOptions,
    },
    #[serde(rename_all = "camelCase")]
    Table {
        table: TableSpec,
        #[serde(default)]
        options: TableOptions,
    },
    #[serde(rename_all = "camelCase")]
    Chart {
        series: Vec<ChartSeries>,
        #[serde(default)]
        options: ChartOptions,
    },
    Callout { callout: CalloutSpec },
    Card { card: CardSpec },
}

/// One slide build: what to compose, where, plus any issues the upstream
/// content pipeline already knows about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub content: ContentRequest,
    pub region: Rect,
    #[serde(default)]
    pub build_issues: Vec<StyleIssue>,
}

/// Everything a caller needs: the positioned layout for the file writer,
/// the validation verdict for the accept/regenerate decision, and the
/// fingerprints that prove determinism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideBuildResult {
    pub engine_version: String,
    pub layout: LayoutSpec,
    pub validation: ValidationResult,
    pub layout_hash: String,
    pub job_hash: String,
}

/// Compose-then-validate entry point. Holds the one shared resource, the
/// read-only theme; independent slides may be built concurrently from
/// separate pipelines (or clones) with no coordination.
pub struct SlidePipeline {
    theme: ThemeTokens,
}

impl SlidePipeline {
    pub fn new(theme: ThemeTokens) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &ThemeTokens {
        &self.theme
    }

    /// Compose a content request into positioned elements. Never fails:
    /// empty content yields a valid near-empty layout.
    pub fn compose(&self, content: &ContentRequest, region: &Rect) -> LayoutSpec {
        match content {
            ContentRequest::TimelineHorizontal { events, options } => {
                compose_timeline_horizontal(events, region, &self.theme, options)
            }
            ContentRequest::TimelineVertical { events, options } => {
                compose_timeline_vertical(events, region, &self.theme, options)
            }
            ContentRequest::Table { table, options } => {
                compose_table(table, region, &self.theme, options)
            }
            ContentRequest::Chart { series, options } => {
                compose_chart(series, region, &self.theme, options)
            }
            ContentRequest::Callout { callout } => compose_callout(callout, region, &self.theme),
            ContentRequest::Card { card } => compose_card(card, region, &self.theme),
        }
    }

    /// Compose, validate, and fingerprint one slide.
    ///
    /// Validation is always applied to the composed layout; upstream build
    /// issues fold into the final score. The caller decides what to do with
    /// a low score; the engine only reports.
    pub fn build(&self, request: &BuildRequest) -> Result<SlideBuildResult, PipelineError> {
        let layout = self.compose(&request.content, &request.region);
        let validation = validate_build(&layout, &self.theme, &request.build_issues);
        let layout_hash = layout_fingerprint(&layout)?;
        let job_hash = build_fingerprint(request, ENGINE_VERSION)?;

        Ok(SlideBuildResult {
            engine_version: ENGINE_VERSION.to_string(),
            layout,
            validation,
            layout_hash,
            job_hash,
        })
    }
}

impl Default for SlidePipeline {
    fn default() -> Self {
        Self::new(ThemeTokens::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::CalloutKind;

    fn card_request() -> BuildRequest {
        BuildRequest {
            content: ContentRequest::Card {
                card: CardSpec {
                    title: Some("Q3 Highlights".into()),
                    body: "Revenue up 12% quarter over quarter".into(),
                },
            },
            region: Rect::new(1.0, 1.0, 6.0, 3.0),
            build_issues: vec![],
        }
    }

    #[test]
    fn build_always_validates() {
        let pipeline = SlidePipeline::default();
        let result = pipeline.build(&card_request()).unwrap();
        assert!(result.validation.score <= 100.0);
        assert!(!result.layout.content.is_empty());
        assert!(!result.layout_hash.is_empty());
    }

    #[test]
    fn identical_requests_produce_identical_hashes() {
        let pipeline = SlidePipeline::default();
        let a = pipeline.build(&card_request()).unwrap();
        let b = pipeline.build(&card_request()).unwrap();
        assert_eq!(a.layout_hash, b.layout_hash);
        assert_eq!(a.job_hash, b.job_hash);
        assert_eq!(a.validation.score, b.validation.score);
    }

    #[test]
    fn content_request_json_round_trips() {
        let request = BuildRequest {
            content: ContentRequest::Callout {
                callout: CalloutSpec {
                    kind: CalloutKind::Warning,
                    title: None,
                    body: "Check the numbers".into(),
                },
            },
            region: Rect::new(0.5, 0.5, 5.0, 2.0),
            build_issues: vec![],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""type":"callout""#));
        let back: BuildRequest = serde_json::from_str(&json).unwrap();
        match back.content {
            ContentRequest::Callout { callout } => assert_eq!(callout.kind, CalloutKind::Warning),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn empty_timeline_builds_cleanly() {
        let pipeline = SlidePipeline::default();
        let request = BuildRequest {
            content: ContentRequest::TimelineHorizontal {
                events: vec![],
                options: TimelineOptions::default(),
            },
            region: Rect::new(1.0, 2.0, 11.0, 3.0),
            build_issues: vec![],
        };
        let result = pipeline.build(&request).unwrap();
        assert!(result.layout.content.is_empty());
        assert_eq!(result.validation.score, 100.0);
        assert!(result.validation.valid);
    }
}
