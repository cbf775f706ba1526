//! Pipeline driver: walks the step machine, runs the per-step external
//! calls, and carries the final outcome into the preview.
//!
//! Every external call runs under the current step's cancellation token.
//! Navigating away cancels the token; a late result is dropped rather than
//! written into state, and nothing aborts at the transport level.

use super::{StepFields, WizardStep, WizardStore};
use crate::error::WizardError;
use crate::moodboard::{MoodboardAnalysis, MoodboardAnalyzer};
use crate::palette::{data_url_to_bytes, extract_palette};
use crate::tokens::{TokenGenerator, TokenSet};
use tokio_util::sync::CancellationToken;

/// What the preview step displays: a token set, or a terminal error with no
/// automatic retry.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    Ready(TokenSet),
    Failed(String),
}

/// Outcome of one step-scoped external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCall {
    Completed,
    /// The step was abandoned while the call was in flight; the result was
    /// discarded without touching state.
    Cancelled,
}

pub struct WizardDriver {
    store: WizardStore,
    step: WizardStep,
    step_token: CancellationToken,
    moodboard_notice: Option<String>,
    analysis: Option<MoodboardAnalysis>,
    outcome: Option<PipelineOutcome>,
}

impl Default for WizardDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardDriver {
    pub fn new() -> Self {
        Self {
            store: WizardStore::new(),
            step: WizardStep::Identity,
            step_token: CancellationToken::new(),
            moodboard_notice: None,
            analysis: None,
            outcome: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn store(&self) -> &WizardStore {
        &self.store
    }

    pub fn set_fields(&mut self, fields: StepFields) {
        self.store.set(fields);
    }

    /// Token guarding the current step's in-flight work. UI code holds a
    /// clone and cancels it when the user navigates away.
    pub fn step_token(&self) -> CancellationToken {
        self.step_token.clone()
    }

    /// Inline notice from a failed moodboard enrichment, if any.
    pub fn moodboard_notice(&self) -> Option<&str> {
        self.moodboard_notice.as_deref()
    }

    pub fn analysis(&self) -> Option<&MoodboardAnalysis> {
        self.analysis.as_ref()
    }

    pub fn outcome(&self) -> Option<&PipelineOutcome> {
        self.outcome.as_ref()
    }

    fn rotate_token(&mut self) {
        self.step_token.cancel();
        self.step_token = CancellationToken::new();
    }

    /// Move forward one step. Blocked while the current step's required
    /// fields are unset. The Generating → Preview transition happens in
    /// [`Self::run_generation`], never here.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        self.store.require_complete(self.step)?;
        let next = match self.step {
            WizardStep::Identity => WizardStep::StylePreferences,
            WizardStep::StylePreferences => WizardStep::Moodboard,
            WizardStep::Moodboard => WizardStep::Generating,
            WizardStep::Generating | WizardStep::Preview => {
                return Err(WizardError::NoSuchTransition {
                    step: self.step.name(),
                    direction: "forward",
                })
            }
        };
        self.rotate_token();
        self.step = next;
        Ok(next)
    }

    /// Move backward one step, abandoning any in-flight call for the step
    /// being left. Leaving Preview clears the previous outcome so a fresh
    /// forward pass performs a fresh generation (the only retry path).
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let prev = match self.step {
            WizardStep::Identity => {
                return Err(WizardError::NoSuchTransition {
                    step: self.step.name(),
                    direction: "backward",
                })
            }
            WizardStep::StylePreferences => WizardStep::Identity,
            WizardStep::Moodboard => WizardStep::StylePreferences,
            WizardStep::Generating | WizardStep::Preview => WizardStep::Moodboard,
        };
        if self.step == WizardStep::Preview || self.step == WizardStep::Generating {
            self.outcome = None;
        }
        self.rotate_token();
        self.step = prev;
        Ok(prev)
    }

    pub fn reset(&mut self) {
        self.rotate_token();
        self.store.reset();
        self.step = WizardStep::Identity;
        self.moodboard_notice = None;
        self.analysis = None;
        self.outcome = None;
    }

    /// Best-effort moodboard enrichment: extract the palette locally, then
    /// ask the analyzer to label it. Failures record an inline notice and
    /// never block the pipeline; the image itself is kept either way so the
    /// generator still receives it as visual input.
    pub async fn attach_moodboard(
        &mut self,
        analyzer: &MoodboardAnalyzer,
        image_data_url: String,
    ) -> StepCall {
        debug_assert_eq!(self.step, WizardStep::Moodboard);
        self.moodboard_notice = None;
        self.analysis = None;

        let palette = match data_url_to_bytes(&image_data_url).and_then(|b| extract_palette(&b)) {
            Ok(palette) => Some(palette),
            Err(err) => {
                tracing::warn!(error = %err, "palette extraction failed; proceeding without");
                self.moodboard_notice = Some("Could not analyze image colors.".to_string());
                None
            }
        };

        let analysis = match palette {
            Some(ref palette) => {
                let token = self.step_token.clone();
                let call = analyzer.analyze(palette);
                tokio::select! {
                    () = token.cancelled() => return StepCall::Cancelled,
                    result = call => match result {
                        Ok(analysis) => Some(analysis),
                        Err(err) => {
                            tracing::warn!(error = %err, "moodboard analysis failed");
                            self.moodboard_notice =
                                Some("AI analysis failed. Please try again.".to_string());
                            None
                        }
                    },
                }
            }
            None => None,
        };

        self.analysis = analysis;
        self.store.set(StepFields::Moodboard {
            image: Some(image_data_url),
        });
        StepCall::Completed
    }

    /// The one mandatory external call: generate tokens from the full
    /// accumulated state, then enter Preview regardless of success. On
    /// failure the preview carries a terminal error; no default token set
    /// is fabricated and no automatic retry happens.
    pub async fn run_generation(&mut self, generator: &TokenGenerator) -> StepCall {
        debug_assert_eq!(self.step, WizardStep::Generating);
        let request = self.store.to_generate_request();
        let token = self.step_token.clone();

        let result = tokio::select! {
            () = token.cancelled() => return StepCall::Cancelled,
            result = generator.generate(&request) => result,
        };

        self.outcome = Some(match result {
            Ok(tokens) => PipelineOutcome::Ready(tokens),
            Err(err) => {
                tracing::error!(error = %err, "token generation failed");
                PipelineOutcome::Failed("Token generation failed".to_string())
            }
        });
        self.rotate_token();
        self.step = WizardStep::Preview;
        StepCall::Completed
    }
}
