//! The round/attempt state machine driving one challenge session.
//!
//! A session owns bounded budgets: `max_rounds` rounds, each with up to
//! `max_attempts_per_round` candidate attempts. The reference (left) value
//! is captured once per round; candidates (right) are captured fresh every
//! attempt because the widget presents a new image only after a Next
//! click. Extraction failures, provider errors, and mismatches advance the
//! loop; only a missing UI control ends the session with an error.

use crate::classify::{classify, Classification, ClassificationSource, FALLBACK_KIND};
use crate::error::Result;
use crate::extract::{extract, Extraction};
use crate::prompts::PromptSet;
use crate::runlog::{ArtifactStore, AttemptRecord, RunLogger};
use gauntlet_browser::{ChallengeLocators, ChallengeUi};
use gauntlet_core::{run_key, AppConfig, TaskKind};
use gauntlet_vision::{
    crop_challenge_region, decode_png, encode_jpeg, split_left_right, trim_uniform_border,
};
use gauntlet_vlm::VlmProvider;
use image::DynamicImage;
use std::sync::Arc;
use std::time::Duration;

/// Result of one completed session.
#[derive(Debug)]
pub struct SessionOutcome {
    /// Whether the widget accepted a submitted candidate and ended the flow
    pub solved: bool,
    /// How the task kind was determined
    pub classification: Classification,
    /// Per-round results, in order
    pub rounds: Vec<RoundOutcome>,
}

/// Result of one round.
#[derive(Debug)]
pub struct RoundOutcome {
    /// 1-based round index
    pub round: u32,
    /// Candidate attempts consumed; zero when the reference failed to extract
    pub attempts: u32,
    /// Whether a candidate matched the reference and was submitted
    pub matched: bool,
    /// The round's reference extraction
    pub reference: Extraction,
}

/// Task-kind equality between the reference and a candidate.
///
/// Exact comparison only: integer equality for numeric kinds, case-sensitive
/// string equality for seat labels. A failed extraction on either side never
/// matches.
#[must_use]
pub fn values_match(reference: &Extraction, candidate: &Extraction) -> bool {
    match (reference, candidate) {
        (Extraction::Value(left), Extraction::Value(right)) => left == right,
        _ => false,
    }
}

/// One attempt at solving a single challenge widget instance.
///
/// All collaborators are injected so sessions are independently testable
/// and can run in parallel against separate logs.
pub struct ChallengeSession {
    ui: Arc<dyn ChallengeUi>,
    reference_vlm: Arc<dyn VlmProvider>,
    candidate_vlm: Arc<dyn VlmProvider>,
    config: AppConfig,
    locators: ChallengeLocators,
    logger: RunLogger,
    artifacts: ArtifactStore,
    handshake_done: bool,
}

impl ChallengeSession {
    /// Create a session over the given UI and model backends.
    ///
    /// Opens the attempt log and the screenshot artifact directory under
    /// the configured data directory.
    pub fn new(
        ui: Arc<dyn ChallengeUi>,
        reference_vlm: Arc<dyn VlmProvider>,
        candidate_vlm: Arc<dyn VlmProvider>,
        config: AppConfig,
        locators: ChallengeLocators,
    ) -> Result<Self> {
        let data_dir = config.data_dir()?;
        let logger = RunLogger::open(data_dir.join(&config.artifacts.log_file_name))?;
        let artifacts = ArtifactStore::new(data_dir.join(&config.artifacts.screenshot_dir_name))?;

        Ok(Self {
            ui,
            reference_vlm,
            candidate_vlm,
            config,
            locators,
            logger,
            artifacts,
            handshake_done: false,
        })
    }

    fn long_wait(&self) -> Duration {
        Duration::from_secs(self.config.browser.wait_timeout_secs)
    }

    fn short_wait(&self) -> Duration {
        Duration::from_secs(self.config.browser.short_wait_timeout_secs)
    }

    /// Perform the iframe authentication handshake.
    ///
    /// Enters the challenge frame, clicks the Authenticate/Verify control,
    /// and waits until the Submit control confirms the widget is live. Any
    /// control missing within its wait budget is fatal.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.ui
            .enter_challenge_frame(&self.locators.challenge_frame, self.long_wait())
            .await?;
        self.ui
            .find_clickable(&self.locators.authenticate, self.long_wait())
            .await?;
        self.ui.click(&self.locators.authenticate).await?;
        self.ui
            .find_clickable(&self.locators.submit, self.long_wait())
            .await?;
        self.handshake_done = true;
        tracing::info!("Challenge handshake complete");
        Ok(())
    }

    /// Run the session to a terminal state.
    ///
    /// Returns `solved: false` (not an error) when every round's attempt
    /// budget is exhausted without the widget ending the flow. Errors are
    /// reserved for missing UI controls and artifact I/O failures; the
    /// caller decides whether to restart the outer workflow from scratch.
    pub async fn solve(&mut self) -> Result<SessionOutcome> {
        let classification = self.classify_task().await?;
        let prompts = PromptSet::for_kind(classification.kind);

        let mut rounds = Vec::new();
        let mut solved = false;

        for round in 1..=self.config.solver.max_rounds {
            tracing::info!("Starting round {round}");
            let (outcome, session_done) = self.run_round(round, classification.kind, prompts).await?;
            rounds.push(outcome);

            if session_done {
                solved = true;
                break;
            }

            // The widget presents a fresh challenge set after the first
            // round behind a Try again control.
            if round == 1
                && round < self.config.solver.max_rounds
                && self.config.solver.retry_after_first_round
            {
                tracing::info!("Waiting for Try again control");
                tokio::time::sleep(Duration::from_millis(self.config.browser.recovery_delay_ms))
                    .await;
                self.ui
                    .find_clickable(&self.locators.try_again, self.short_wait())
                    .await?;
                self.ui.click(&self.locators.try_again).await?;
            }
        }

        if solved {
            tracing::info!("Session solved after {} round(s)", rounds.len());
        } else {
            tracing::warn!("Session exhausted all rounds without success");
        }

        Ok(SessionOutcome {
            solved,
            classification,
            rounds,
        })
    }

    /// Determine the task kind once at session start.
    ///
    /// A widget that already shows a Submit control before this session
    /// performed its handshake is mid-flow from a prior session; its
    /// instructions region is gone, so classification is skipped and the
    /// most common kind assumed.
    async fn classify_task(&self) -> Result<Classification> {
        if !self.handshake_done && self.ui.is_present(&self.locators.submit).await? {
            tracing::warn!(
                "Submit control already present, assuming mid-flow widget with kind {}",
                FALLBACK_KIND
            );
            return Ok(Classification {
                kind: FALLBACK_KIND,
                source: ClassificationSource::MidFlowDefault,
            });
        }
        classify(self.ui.as_ref(), self.candidate_vlm.as_ref()).await
    }

    /// Capture a fresh screenshot and cut it into (left, right) halves.
    async fn capture_halves(&self) -> Result<(DynamicImage, DynamicImage)> {
        let png = self.ui.screenshot_frame().await?;
        let frame = decode_png(&png)?;
        let band = crop_challenge_region(&frame);
        Ok(split_left_right(&band))
    }

    /// Query a model over an image, absorbing provider failures.
    async fn query(&self, vlm: &dyn VlmProvider, prompt: &str, jpeg: &[u8]) -> Option<String> {
        match vlm.describe_image(prompt, jpeg).await {
            Ok(reply) => Some(reply.content),
            Err(e) => {
                tracing::warn!("VLM query failed: {}", e);
                None
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    async fn run_round(
        &self,
        round: u32,
        kind: TaskKind,
        prompts: PromptSet,
    ) -> Result<(RoundOutcome, bool)> {
        let key = run_key();
        let (left, right_first) = self.capture_halves().await?;

        // The reference is captured exactly once and reused for every
        // attempt's comparison within this round.
        let left_jpeg = encode_jpeg(&trim_uniform_border(&left))?;
        let left_path = self.artifacts.save_reference(&key, round, &left_jpeg)?;

        let reference = match self
            .query(self.reference_vlm.as_ref(), prompts.reference, &left_jpeg)
            .await
        {
            Some(text) => extract(kind, &text),
            None => Extraction::Failed,
        };

        if reference == Extraction::Failed {
            // Without a reference there is nothing to compare against;
            // abandon the round and let the caller move on.
            tracing::warn!("Round {round}: reference extraction failed, skipping round");
            return Ok((
                RoundOutcome {
                    round,
                    attempts: 0,
                    matched: false,
                    reference,
                },
                false,
            ));
        }

        let max_attempts = self.config.solver.max_attempts_per_round;
        let mut right_first = Some(right_first);

        for attempt in 1..=max_attempts {
            tracing::debug!("Round {round} attempt {attempt}");

            // Attempt 1 reuses the right half captured alongside the
            // reference; the widget only swaps candidates after Next.
            let right = match right_first.take() {
                Some(img) => img,
                None => self.capture_halves().await?.1,
            };

            let right_jpeg = encode_jpeg(&trim_uniform_border(&right))?;
            let right_path = self
                .artifacts
                .save_candidate(&key, round, attempt, &right_jpeg)?;

            let candidate = match self
                .query(self.candidate_vlm.as_ref(), prompts.candidate, &right_jpeg)
                .await
            {
                Some(text) => extract(kind, &text),
                None => Extraction::Failed,
            };

            self.logger.append(&AttemptRecord {
                run_timestamp: key.clone(),
                filename_left: left_path.display().to_string(),
                filename_right: right_path.display().to_string(),
                extracted_left: reference.log_field(),
                extracted_right: candidate.log_field(),
                left_model: self.reference_vlm.model_name().to_string(),
                right_model: self.candidate_vlm.model_name().to_string(),
                task_type: kind,
            })?;

            if values_match(&reference, &candidate) {
                tracing::info!(
                    "Round {round} attempt {attempt}: candidate matches reference, submitting"
                );
                self.ui
                    .find_clickable(&self.locators.submit, self.short_wait())
                    .await?;
                self.ui.click(&self.locators.submit).await?;
                tokio::time::sleep(Duration::from_millis(
                    self.config.browser.post_submit_delay_ms,
                ))
                .await;

                // Another Submit control means another round remains.
                let more_rounds = self.ui.is_present(&self.locators.submit).await?;
                return Ok((
                    RoundOutcome {
                        round,
                        attempts: attempt,
                        matched: true,
                        reference,
                    },
                    !more_rounds,
                ));
            }

            if attempt < max_attempts {
                self.ui
                    .find_clickable(&self.locators.next_image, self.short_wait())
                    .await?;
                self.ui.click(&self.locators.next_image).await?;
                tokio::time::sleep(Duration::from_millis(self.config.browser.post_click_delay_ms))
                    .await;
            }
        }

        tracing::info!("Round {round} exhausted {max_attempts} attempts without a match");
        Ok((
            RoundOutcome {
                round,
                attempts: max_attempts,
                matched: false,
                reference,
            },
            false,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet_core::ExtractedValue;

    #[test]
    fn test_values_match_numbers() {
        let seven = Extraction::Value(ExtractedValue::Number(7));
        let also_seven = Extraction::Value(ExtractedValue::Number(7));
        let three = Extraction::Value(ExtractedValue::Number(3));
        assert!(values_match(&seven, &also_seven));
        assert!(!values_match(&seven, &three));
    }

    #[test]
    fn test_values_match_labels_case_sensitive() {
        let b12 = Extraction::Value(ExtractedValue::Label("B-12".to_string()));
        let lower = Extraction::Value(ExtractedValue::Label("b-12".to_string()));
        assert!(values_match(&b12, &b12.clone()));
        assert!(!values_match(&b12, &lower));
    }

    #[test]
    fn test_failed_extraction_never_matches() {
        let seven = Extraction::Value(ExtractedValue::Number(7));
        assert!(!values_match(&Extraction::Failed, &seven));
        assert!(!values_match(&seven, &Extraction::Failed));
        // Two failures are not a match either
        assert!(!values_match(&Extraction::Failed, &Extraction::Failed));
    }
}
