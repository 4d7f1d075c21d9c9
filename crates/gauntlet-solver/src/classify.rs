//! Task kind classification, run once per session.

use crate::error::Result;
use crate::prompts::CLASSIFY_PROMPT;
use gauntlet_browser::ChallengeUi;
use gauntlet_core::TaskKind;
use gauntlet_vision::{crop_instructions_region, decode_png, encode_jpeg};
use gauntlet_vlm::VlmProvider;

/// How the session's task kind was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    /// The model named one of the known kinds
    Model,
    /// The model's reply matched no kind, or the provider failed;
    /// the most-common-kind default was used
    Fallback,
    /// A Submit control was already present, so the widget was mid-flow
    /// and classification was skipped
    MidFlowDefault,
}

/// The classified task kind, with provenance.
///
/// A fallback classification very likely misroutes a non-length session
/// into the wrong prompt pair, so the provenance is surfaced here and in
/// the logs instead of being silently discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The kind the session will use
    pub kind: TaskKind,
    /// How the kind was determined
    pub source: ClassificationSource,
}

impl Classification {
    /// Whether the kind came from the model rather than a default.
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.source == ClassificationSource::Model
    }
}

/// The kind assumed when classification cannot decide.
///
/// Length is the most common kind the widget serves.
pub const FALLBACK_KIND: TaskKind = TaskKind::Length;

/// Classify the session's task kind from the instructions region.
///
/// Screenshots the challenge document, crops the top half where the widget
/// states the task, and asks the model to name one of the four kinds. Any
/// provider failure or unmatched reply falls back to [`FALLBACK_KIND`]
/// with `source = Fallback`; only screenshot capture or decode failures
/// propagate as errors.
pub async fn classify(ui: &dyn ChallengeUi, vlm: &dyn VlmProvider) -> Result<Classification> {
    let png = ui.screenshot_frame().await?;
    let frame = decode_png(&png)?;
    let instructions = crop_instructions_region(&frame);
    let jpeg = encode_jpeg(&instructions)?;

    let kind = match vlm.describe_image(CLASSIFY_PROMPT, &jpeg).await {
        Ok(reply) => {
            tracing::debug!("Classifier reply: {}", reply.content);
            TaskKind::from_response(&reply.content)
        }
        Err(e) => {
            tracing::warn!("Classifier VLM query failed: {}", e);
            None
        }
    };

    match kind {
        Some(kind) => {
            tracing::info!("Classified task kind: {}", kind);
            Ok(Classification {
                kind,
                source: ClassificationSource::Model,
            })
        }
        None => {
            tracing::warn!(
                "Task kind classification ambiguous, defaulting to {}",
                FALLBACK_KIND
            );
            Ok(Classification {
                kind: FALLBACK_KIND,
                source: ClassificationSource::Fallback,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_kind_is_length() {
        assert_eq!(FALLBACK_KIND, TaskKind::Length);
    }

    #[test]
    fn test_confidence() {
        let classified = Classification {
            kind: TaskKind::Sum,
            source: ClassificationSource::Model,
        };
        assert!(classified.is_confident());

        let fallback = Classification {
            kind: FALLBACK_KIND,
            source: ClassificationSource::Fallback,
        };
        assert!(!fallback.is_confident());

        let mid_flow = Classification {
            kind: FALLBACK_KIND,
            source: ClassificationSource::MidFlowDefault,
        };
        assert!(!mid_flow.is_confident());
    }
}
