use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by knowledge-base search operations.
pub enum SearchError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("request to BigQuery failed: {message}")]
    Request {
        /// Error message.
        message: String,
    },

    /// The API rejected the credentials (HTTP 401/403).
    #[error("BigQuery authentication failed")]
    AuthFailed,

    /// Any other non-success HTTP status.
    #[error("BigQuery returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (or a prefix of it).
        message: String,
    },

    /// The query did not finish within the request deadline.
    #[error("query did not complete within the request deadline")]
    Incomplete,

    /// The response body was not the expected JSON shape.
    #[error("failed to parse BigQuery response: {message}")]
    ResponseParse {
        /// Error message.
        message: String,
    },
}
