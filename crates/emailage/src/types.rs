//! Emailage API response types.

use serde::Deserialize;
use serde_json::Value;

/// Response envelope returned by every API call.
///
/// The service reports success or failure inside the JSON payload via
/// `responseStatus`, not via HTTP status codes; the rest of the body (the
/// `query` object with its `results`, flag acknowledgements, etc.) is kept
/// as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Service-level status, when present.
    #[serde(rename = "responseStatus", default)]
    pub response_status: Option<ResponseStatus>,
    /// Remaining response fields as raw JSON.
    #[serde(flatten)]
    pub body: serde_json::Map<String, Value>,
}

/// Service-level response status.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseStatus {
    /// `success` or `failed`.
    pub status: String,
    /// Service error code (`0` on success).
    #[serde(rename = "errorCode", default)]
    pub error_code: String,
    /// Human-readable error description.
    #[serde(default)]
    pub description: String,
}
