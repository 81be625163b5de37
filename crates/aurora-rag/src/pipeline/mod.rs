//! The validate → retrieve → generate pipeline.
//!
//! A strictly linear state machine over a single request with three early
//! exits: validation block, retrieval miss, then the grounded answer. No
//! branch re-enters an earlier state, and no expected failure mode of any
//! stage escapes as an error — callers branch on [`AskOutcome`].

#[cfg(test)]
mod tests;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::NO_CONTEXT_ANSWER;
use crate::gemini::{CompletionModel, SafetyThreshold};
use crate::responder::Responder;
use crate::retrieval::KnowledgeSearch;
use crate::validator::{ValidationOutcome, Validator};

/// Which way the safety gate went for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Passed,
    Blocked,
}

/// Terminal state of one pipeline run. `answer` is always non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct AskOutcome {
    pub answer: String,
    pub context_found: bool,
    pub validation_status: ValidationStatus,
    pub error: Option<String>,
}

/// Model selection and safety settings for the two completion stages.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub validator_model: String,
    pub responder_model: String,
    pub safety_threshold: SafetyThreshold,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            validator_model: config.validator_model.clone(),
            responder_model: config.responder_model.clone(),
            safety_threshold: config.safety_threshold,
        }
    }
}

/// The three stages wired together. Constructed once at startup and shared
/// (immutably) by every request.
#[derive(Clone)]
pub struct Pipeline<M, K>
where
    M: CompletionModel + Clone,
    K: KnowledgeSearch,
{
    validator: Validator<M>,
    knowledge: K,
    responder: Responder<M>,
}

impl<M, K> Pipeline<M, K>
where
    M: CompletionModel + Clone,
    K: KnowledgeSearch,
{
    /// Wires both completion stages to the same model handle.
    pub fn new(model: M, knowledge: K, config: PipelineConfig) -> Self {
        Self {
            validator: Validator::new(
                model.clone(),
                config.validator_model,
                config.safety_threshold,
            ),
            knowledge,
            responder: Responder::new(model, config.responder_model),
        }
    }

    /// Runs one non-empty question through the pipeline.
    ///
    /// Empty-question rejection belongs to the transport layer; by the time
    /// a question reaches here it has already been trimmed and checked.
    pub async fn ask(&self, question: &str) -> AskOutcome {
        if let ValidationOutcome::Blocked { reason } = self.validator.validate(question).await {
            info!(reason = %reason, "question rejected by validator");
            return AskOutcome {
                answer: format!("I cannot process this question: {reason}"),
                context_found: false,
                validation_status: ValidationStatus::Blocked,
                error: Some(reason),
            };
        }

        let context = match self.knowledge.search(question).await {
            Ok(context) => context,
            Err(e) => {
                // retrieval failures are logged, never propagated
                warn!(error = %e, "knowledge base search failed");
                None
            }
        };

        let Some(context) = context else {
            return AskOutcome {
                answer: NO_CONTEXT_ANSWER.to_string(),
                context_found: false,
                validation_status: ValidationStatus::Passed,
                error: None,
            };
        };

        let answer = self.responder.respond(question, &context).await;

        AskOutcome {
            answer,
            context_found: true,
            validation_status: ValidationStatus::Passed,
            error: None,
        }
    }
}
