//! Grounded answer generation.
//!
//! One generative call constrained to the retrieved passage. Generation
//! failures are absorbed here and replaced with a fixed apology — they are
//! never fatal to the caller.


use tracing::error;

use crate::constants::{GENERATION_FALLBACK_ANSWER, RESPONDER_INSTRUCTION};
use crate::gemini::{CompletionModel, GenerateRequest};

/// Answer generator over a completion model.
#[derive(Clone)]
pub struct Responder<M: CompletionModel> {
    model: M,
    model_id: String,
}

impl<M: CompletionModel> Responder<M> {
    pub fn new(model: M, model_id: impl Into<String>) -> Self {
        Self {
            model,
            model_id: model_id.into(),
        }
    }

    /// Generates an answer to `question` using only `context`.
    ///
    /// Returns the trimmed completion text, or the fixed fallback answer if
    /// the call fails or produces nothing.
    pub async fn respond(&self, question: &str, context: &str) -> String {
        let request = GenerateRequest::new(grounded_prompt(question, context));

        match self.model.generate(&self.model_id, request).await {
            Ok(completion) => {
                let answer = completion.text.trim();
                if answer.is_empty() {
                    error!("responder returned an empty completion");
                    GENERATION_FALLBACK_ANSWER.to_string()
                } else {
                    answer.to_string()
                }
            }
            Err(e) => {
                error!(error = %e, "response generation failed");
                GENERATION_FALLBACK_ANSWER.to_string()
            }
        }
    }
}

/// Builds the single prompt embedding the instruction, the retrieved
/// passage, and the question.
pub fn grounded_prompt(question: &str, context: &str) -> String {
    format!(
        "{RESPONDER_INSTRUCTION}\n\
         \n\
         Available Information:\n\
         {context}\n\
         \n\
         User Question:\n\
         {question}\n\
         \n\
         Response:"
    )
}
