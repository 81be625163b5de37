//! Prompt safety validation.
//!
//! The raw question is submitted to a safety-tuned model and the decision is
//! read off the structured termination signal. Every failure mode of this
//! stage rejects the prompt — a validator that cannot answer never silently
//! accepts.


use tracing::warn;

use crate::constants::SAFETY_BLOCK_MESSAGE;
use crate::gemini::{CompletionModel, GeminiError, GenerateRequest, SafetyThreshold};

/// Outcome of screening one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The prompt is safe to process.
    Passed,
    /// The prompt was rejected; `reason` is user-presentable.
    Blocked { reason: String },
}

impl ValidationOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, ValidationOutcome::Blocked { .. })
    }
}

/// Safety validator over a completion model.
#[derive(Clone)]
pub struct Validator<M: CompletionModel> {
    model: M,
    model_id: String,
    safety_threshold: SafetyThreshold,
}

impl<M: CompletionModel> Validator<M> {
    pub fn new(model: M, model_id: impl Into<String>, safety_threshold: SafetyThreshold) -> Self {
        Self {
            model,
            model_id: model_id.into(),
            safety_threshold,
        }
    }

    /// Screens `question`. One model call, no retry.
    ///
    /// A candidate terminated by the safety filter and a prompt blocked
    /// before generation are the same verdict to callers; any other model
    /// error fails closed with a distinct reason.
    pub async fn validate(&self, question: &str) -> ValidationOutcome {
        let request =
            GenerateRequest::new(question).with_safety_threshold(self.safety_threshold);

        match self.model.generate(&self.model_id, request).await {
            Ok(completion) if completion.is_safety_blocked() => ValidationOutcome::Blocked {
                reason: SAFETY_BLOCK_MESSAGE.to_string(),
            },
            Ok(_) => ValidationOutcome::Passed,
            Err(GeminiError::PromptBlocked { reason }) => {
                warn!(reason = %reason, "prompt blocked by safety filter");
                ValidationOutcome::Blocked {
                    reason: SAFETY_BLOCK_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                warn!(error = %e, "validator call failed, rejecting prompt");
                ValidationOutcome::Blocked {
                    reason: format!("Error validating prompt: {e}"),
                }
            }
        }
    }
}
