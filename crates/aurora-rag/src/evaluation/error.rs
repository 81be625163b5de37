use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the evaluation-service client.
pub enum EvalError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("request to evaluation service failed: {message}")]
    Request {
        /// Error message.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("evaluation service returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (or a prefix of it).
        message: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to parse evaluation response: {message}")]
    ResponseParse {
        /// Error message.
        message: String,
    },
}
