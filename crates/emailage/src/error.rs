//! Error types for the Emailage client.

/// Request argument validation failure, raised before any network call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// Not of the form `local@domain-with-at-least-one-dot`.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// Not an IPv4 dotted quad or a parseable IPv6 literal.
    #[error("{0} is not a valid IP address")]
    InvalidIp(String),

    /// Flag value other than `fraud`, `neutral`, or `good`.
    #[error("flag must be one of fraud, neutral, good; {0} was given")]
    InvalidFlag(String),

    /// Fraud flag submitted without a fraud code.
    #[error("a fraud code is required when flagging as fraud")]
    MissingFraudCode,
}

/// Error from Emailage API operations.
///
/// Nothing is retried internally; every error propagates to the caller
/// immediately.
#[derive(Debug, thiserror::Error)]
pub enum EmailageError {
    /// Request argument validation failed.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    Transport(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Response body was empty or contained no JSON object.
    #[error("empty or unparseable response body")]
    EmptyResponse,

    /// JSON deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}
