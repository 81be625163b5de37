//! Thin client for the Gemini `generateContent` REST endpoint.
//!
//! The safety decision in the validator hinges on the *structured*
//! `finishReason` / `promptFeedback.blockReason` fields, so this module
//! talks to the native API directly instead of going through a
//! provider-agnostic chat layer that hides them.

pub mod error;
pub mod model;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::GeminiError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCompletionModel;
pub use model::{Completion, FinishReason, GenerateRequest, HARM_CATEGORIES, SafetyThreshold};

use serde_json::Value;

#[derive(Clone)]
/// Gemini API client. Auth is a `?key=` query parameter.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client for `base_url` with the given API key.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Returns the configured endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one `generateContent` call. Exactly one attempt; retry policy,
    /// if any, belongs to the caller.
    pub async fn generate(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> Result<Completion, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request.to_body())
            .send()
            .await
            .map_err(|e| GeminiError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| GeminiError::Request {
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &body_text));
        }

        let body: Value =
            serde_json::from_str(&body_text).map_err(|e| GeminiError::ResponseParse {
                message: format!("invalid JSON in response: {e}"),
            })?;

        parse_completion(&body)
    }

    fn map_http_error(status: reqwest::StatusCode, body_text: &str) -> GeminiError {
        match status.as_u16() {
            401 | 403 => GeminiError::AuthFailed,
            code => GeminiError::Http {
                status: code,
                message: body_text.chars().take(200).collect(),
            },
        }
    }
}

/// Parses a `generateContent` response body into a [`Completion`].
///
/// A prompt the API refused outright carries `promptFeedback.blockReason`
/// and no candidates; that surfaces as [`GeminiError::PromptBlocked`] so
/// callers never have to sniff error message text.
pub(crate) fn parse_completion(body: &Value) -> Result<Completion, GeminiError> {
    let candidate = match body["candidates"].as_array() {
        Some(candidates) if !candidates.is_empty() => &candidates[0],
        _ => {
            if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
                return Err(GeminiError::PromptBlocked {
                    reason: reason.to_string(),
                });
            }
            return Err(GeminiError::ResponseParse {
                message: "missing or empty 'candidates' array".to_string(),
            });
        }
    };

    let text = candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let finish_reason = candidate["finishReason"].as_str().map(FinishReason::parse);

    Ok(Completion {
        text,
        finish_reason,
    })
}

/// One generative-completion collaborator (validator or responder model).
///
/// Implemented by [`GeminiClient`] in production and by a scripted mock in
/// tests.
pub trait CompletionModel: Send + Sync {
    /// Generates a completion for `request` using `model`.
    fn generate(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> impl std::future::Future<Output = Result<Completion, GeminiError>> + Send;
}

impl CompletionModel for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> Result<Completion, GeminiError> {
        self.generate(model, request).await
    }
}
