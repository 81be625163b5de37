use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by Gemini completion calls.
pub enum GeminiError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("request to Gemini API failed: {message}")]
    Request {
        /// Error message.
        message: String,
    },

    /// The API rejected the key (HTTP 401/403).
    #[error("Gemini API authentication failed")]
    AuthFailed,

    /// Any other non-success HTTP status.
    #[error("Gemini API returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (or a prefix of it).
        message: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to parse Gemini response: {message}")]
    ResponseParse {
        /// Error message.
        message: String,
    },

    /// The prompt itself was blocked before any generation happened
    /// (`promptFeedback.blockReason`, no candidates returned).
    #[error("prompt blocked before generation: {reason}")]
    PromptBlocked {
        /// Structured block reason reported by the API.
        reason: String,
    },
}
