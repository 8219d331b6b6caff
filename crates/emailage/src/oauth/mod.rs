//! OAuth 1.0 HMAC-SHA1 authentication for the Emailage API.
//!
//! Emailage follows the OAuth 1.0 signing process with two quirks of its
//! own: the consumer secret is transmitted as `oauth_consumer_key`, and the
//! HMAC key is derived from the consumer token alone (`token` + `&`) rather
//! than from secret and token as RFC 5849 prescribes.

pub mod signature;

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

/// Signature method tag; the only method the service accepts.
const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// OAuth version tag; must serialize as the literal text `1.0`.
const OAUTH_VERSION: &str = "1.0";

/// OAuth 1.0 HMAC-SHA1 authentication state (internal use only).
pub(crate) struct OAuth1Auth {
    consumer_key: String,
    hmac_key: String,
}

impl OAuth1Auth {
    /// Create auth state from Emailage credentials.
    pub(crate) fn new(secret: &str, token: &str) -> Self {
        Self {
            consumer_key: secret.to_owned(),
            hmac_key: format!("{token}&"),
        }
    }

    /// Insert the five reserved authentication entries into `params`.
    ///
    /// Caller-supplied values under the reserved keys are overwritten, not
    /// merged. When `nonce` or `timestamp` are `None` a fresh UUIDv4 nonce
    /// and the current Unix time are generated; both must be fresh per
    /// request, never reused.
    pub(crate) fn add_auth_entries(
        &self,
        params: &mut BTreeMap<String, String>,
        nonce: Option<&str>,
        timestamp: Option<u64>,
    ) {
        let nonce = nonce.map_or_else(generate_nonce, str::to_owned);
        let timestamp = timestamp.unwrap_or_else(generate_timestamp);

        params.insert("oauth_consumer_key".to_owned(), self.consumer_key.clone());
        params.insert("oauth_nonce".to_owned(), nonce);
        params.insert(
            "oauth_signature_method".to_owned(),
            SIGNATURE_METHOD.to_owned(),
        );
        params.insert("oauth_timestamp".to_owned(), timestamp.to_string());
        params.insert("oauth_version".to_owned(), OAUTH_VERSION.to_owned());
    }

    /// Compute the `oauth_signature` value for a fully assembled parameter
    /// set.
    pub(crate) fn sign(
        &self,
        method: &str,
        url: &str,
        params: &BTreeMap<String, String>,
    ) -> String {
        signature::create(method, url, params, &self.hmac_key)
    }
}

/// Generate a random unique nonce (UUIDv4).
fn generate_nonce() -> String {
    Uuid::new_v4().to_string()
}

/// Current Unix time in whole seconds.
fn generate_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}
