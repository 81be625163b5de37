use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::error::GeminiError;
use super::model::{Completion, FinishReason, GenerateRequest};
use super::CompletionModel;

/// Scripted completion model for tests.
///
/// Responses are consumed front-to-back; when the script runs dry, every
/// further call returns a plain `STOP` completion. Clones share the same
/// script and call log.
#[derive(Clone, Default)]
pub struct MockCompletionModel {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

enum Scripted {
    Completion { text: String, finish_reason: FinishReason },
    PromptBlocked { reason: String },
    Error { message: String },
}

/// One recorded `generate` invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
}

impl MockCompletionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a normal completion with the given text.
    pub fn push_completion(&self, text: &str) {
        self.push(Scripted::Completion {
            text: text.to_string(),
            finish_reason: FinishReason::Stop,
        });
    }

    /// Queues a completion terminated by the safety filter.
    pub fn push_safety_block(&self) {
        self.push(Scripted::Completion {
            text: String::new(),
            finish_reason: FinishReason::Safety,
        });
    }

    /// Queues a prompt-level block (no candidates generated).
    pub fn push_prompt_blocked(&self, reason: &str) {
        self.push(Scripted::PromptBlocked {
            reason: reason.to_string(),
        });
    }

    /// Queues a transport-level failure.
    pub fn push_error(&self, message: &str) {
        self.push(Scripted::Error {
            message: message.to_string(),
        });
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner
            .calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Calls issued against a specific model id.
    pub fn calls_for_model(&self, model: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.model == model)
            .collect()
    }

    fn push(&self, scripted: Scripted) {
        if let Ok(mut script) = self.inner.script.lock() {
            script.push_back(scripted);
        }
    }
}

impl CompletionModel for MockCompletionModel {
    async fn generate(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> Result<Completion, GeminiError> {
        if let Ok(mut calls) = self.inner.calls.lock() {
            calls.push(RecordedCall {
                model: model.to_string(),
                prompt: request.prompt.clone(),
            });
        }

        let scripted = self
            .inner
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());

        match scripted {
            Some(Scripted::Completion {
                text,
                finish_reason,
            }) => Ok(Completion {
                text,
                finish_reason: Some(finish_reason),
            }),
            Some(Scripted::PromptBlocked { reason }) => {
                Err(GeminiError::PromptBlocked { reason })
            }
            Some(Scripted::Error { message }) => Err(GeminiError::Request { message }),
            None => Ok(Completion {
                text: "mock completion".to_string(),
                finish_reason: Some(FinishReason::Stop),
            }),
        }
    }
}
