//! Emailage REST API client.
//!
//! Sync HTTP client for the Emailage fraud-risk scoring service with
//! OAuth 1.0 HMAC-SHA1 request signing.

mod flag;
mod query;

pub use flag::FraudCode;

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::error::EmailageError;
use crate::oauth::OAuth1Auth;
use crate::oauth::signature::normalize_query_parameters;
use crate::types::ApiResponse;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Wire format requested from the service. Added before signing, since it
/// participates in the signed base string.
const FORMAT: &str = "json";

/// Target environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// `https://api.emailage.com`
    #[default]
    Production,
    /// `https://sandbox.emailage.com`
    Sandbox,
}

impl Environment {
    fn domain(self) -> &'static str {
        match self {
            Self::Production => "https://api.emailage.com",
            Self::Sandbox => "https://sandbox.emailage.com",
        }
    }
}

/// HTTP method used for every request, chosen per client.
///
/// The service signs the two methods differently: GET signs the full
/// parameter set, POST signs only `format` plus the auth entries while user
/// parameters travel unsigned in the body. The asymmetry is a protocol
/// quirk of the service and both sides must agree on it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// All parameters in the query string, all signed.
    #[default]
    Get,
    /// Auth envelope in the query string, user parameters in the body.
    Post,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Production or sandbox service.
    pub environment: Environment,
    /// Transport method for every request issued by this client.
    pub method: HttpMethod,
    /// Per-request timeout, passed to the HTTP agent unmodified.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            method: HttpMethod::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
        }
    }
}

/// Fully assembled request: final URL (query string included) and, for
/// POST, the encoded body.
struct PreparedRequest {
    url: String,
    body: Option<String>,
}

/// Emailage REST API client.
///
/// Methods take `&self`; replacing credentials takes `&mut self`, so the
/// borrow checker rules out credential mutation concurrent with in-flight
/// requests.
pub struct EmailageClient {
    agent: Agent,
    domain: &'static str,
    method: HttpMethod,
    auth: OAuth1Auth,
}

impl EmailageClient {
    /// Create a client with default configuration (production, GET, 30 s
    /// timeout).
    ///
    /// # Arguments
    /// * `secret` - Consumer secret, e.g. SID or API key
    /// * `token` - Consumer OAuth token
    pub fn new(secret: &str, token: &str) -> Self {
        Self::with_config(secret, token, &ClientConfig::default())
    }

    /// Create a client from explicit configuration.
    pub fn with_config(secret: &str, token: &str, config: &ClientConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            domain: config.environment.domain(),
            method: config.method,
            auth: OAuth1Auth::new(secret, token),
        }
    }

    /// Replace both credentials at once.
    ///
    /// Partial replacement is not supported; secret and token always change
    /// together.
    pub fn set_credentials(&mut self, secret: &str, token: &str) {
        self.auth = OAuth1Auth::new(secret, token);
    }

    /// Issue a signed request against an endpoint (`""` or `"/flag"`) and
    /// decode the JSON response.
    pub(crate) fn request(
        &self,
        endpoint: &str,
        user_params: BTreeMap<String, String>,
    ) -> Result<ApiResponse, EmailageError> {
        let prepared = self.prepare(endpoint, user_params, None, None);
        debug!("Requesting {}", prepared.url);

        let response = match prepared.body {
            None => self.agent.get(&prepared.url).call()?,
            Some(ref body) => self
                .agent
                .post(&prepared.url)
                .header("Content-Type", "application/json")
                .send(body.as_bytes())?,
        };

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let text = body_reader.read_to_string()?;

        if status >= 400 {
            return Err(EmailageError::HttpResponse { status, body: text });
        }

        decode_response(&text)
    }

    /// Assemble and sign a request.
    ///
    /// Signing happens exactly once, after every entry (including `format`
    /// and, for GET, all user parameters) is present. The transmitted query
    /// string is produced by the same normalization that fed the signature,
    /// so both sides derive identical bytes.
    fn prepare(
        &self,
        endpoint: &str,
        user_params: BTreeMap<String, String>,
        nonce: Option<&str>,
        timestamp: Option<u64>,
    ) -> PreparedRequest {
        let url = format!("{}/emailagevalidator{}/", self.domain, endpoint);

        match self.method {
            HttpMethod::Get => {
                let mut params = user_params;
                params.insert("format".to_owned(), FORMAT.to_owned());
                self.auth.add_auth_entries(&mut params, nonce, timestamp);

                let signature = self.auth.sign("GET", &url, &params);
                params.insert("oauth_signature".to_owned(), signature);

                PreparedRequest {
                    url: format!("{url}?{}", normalize_query_parameters(&params)),
                    body: None,
                }
            }
            HttpMethod::Post => {
                // User parameters travel in the body, outside the
                // signature base.
                let mut envelope = BTreeMap::new();
                envelope.insert("format".to_owned(), FORMAT.to_owned());
                self.auth.add_auth_entries(&mut envelope, nonce, timestamp);

                let signature = self.auth.sign("POST", &url, &envelope);
                envelope.insert("oauth_signature".to_owned(), signature);

                PreparedRequest {
                    url: format!("{url}?{}", normalize_query_parameters(&envelope)),
                    body: Some(normalize_query_parameters(&user_params)),
                }
            }
        }
    }
}

/// Decode a response body, stripping the UTF-8 BOM or any other leading
/// noise the service emits before the JSON object.
fn decode_response(text: &str) -> Result<ApiResponse, EmailageError> {
    let json = text
        .find('{')
        .map(|start| &text[start..])
        .ok_or(EmailageError::EmptyResponse)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::oauth::signature;

    const NONCE: &str = "kllo9940pd9333jh";
    const TIMESTAMP: u64 = 1_191_242_096;

    fn client(method: HttpMethod) -> EmailageClient {
        EmailageClient::with_config(
            "secret",
            "token",
            &ClientConfig {
                environment: Environment::Sandbox,
                method,
                ..ClientConfig::default()
            },
        )
    }

    fn user_params() -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("query".to_owned(), "test@example.com".to_owned());
        params.insert("urid".to_owned(), "1234567890".to_owned());
        params
    }

    #[test]
    fn get_targets_the_validator_endpoint() {
        let prepared = client(HttpMethod::Get).prepare("", user_params(), Some(NONCE), Some(TIMESTAMP));
        assert!(
            prepared
                .url
                .starts_with("https://sandbox.emailage.com/emailagevalidator/?")
        );
        assert!(prepared.body.is_none());
    }

    #[test]
    fn flag_endpoint_is_appended_before_the_trailing_slash() {
        let prepared =
            client(HttpMethod::Get).prepare("/flag", user_params(), Some(NONCE), Some(TIMESTAMP));
        assert!(
            prepared
                .url
                .starts_with("https://sandbox.emailage.com/emailagevalidator/flag/?")
        );
    }

    #[test]
    fn get_signs_the_full_parameter_set() {
        let prepared = client(HttpMethod::Get).prepare("", user_params(), Some(NONCE), Some(TIMESTAMP));
        let query = prepared.url.split_once('?').unwrap().1;

        // Reconstruct the signed set from the transmitted query string; the
        // signature over it must match the transmitted signature.
        let mut params: BTreeMap<String, String> = BTreeMap::new();
        let mut sent_signature = String::new();
        for pair in query.split('&') {
            let (k, v) = pair.split_once('=').unwrap();
            let k = percent_encoding::percent_decode_str(k).decode_utf8().unwrap();
            let v = percent_encoding::percent_decode_str(v).decode_utf8().unwrap();
            if k == "oauth_signature" {
                sent_signature = v.into_owned();
            } else {
                params.insert(k.into_owned(), v.into_owned());
            }
        }

        assert_eq!(params["format"], "json");
        assert_eq!(params["query"], "test@example.com");
        assert_eq!(params["urid"], "1234567890");
        assert_eq!(params["oauth_consumer_key"], "secret");

        let expected = signature::create(
            "GET",
            "https://sandbox.emailage.com/emailagevalidator/",
            &params,
            "token&",
        );
        assert_eq!(sent_signature, expected);
    }

    #[test]
    fn post_signs_only_the_envelope() {
        let prepared =
            client(HttpMethod::Post).prepare("", user_params(), Some(NONCE), Some(TIMESTAMP));
        let query = prepared.url.split_once('?').unwrap().1;

        // The query string carries only format + auth entries.
        assert!(query.contains("format=json"));
        assert!(query.contains("oauth_signature="));
        assert!(!query.contains("query="));
        assert!(!query.contains("urid="));

        // The body carries only user parameters, sorted and encoded.
        let body = prepared.body.unwrap();
        assert_eq!(body, "query=test%40example.com&urid=1234567890");

        // The signature covers the envelope alone.
        let mut envelope = BTreeMap::new();
        envelope.insert("format".to_owned(), FORMAT.to_owned());
        envelope.insert("oauth_consumer_key".to_owned(), "secret".to_owned());
        envelope.insert("oauth_nonce".to_owned(), NONCE.to_owned());
        envelope.insert("oauth_signature_method".to_owned(), "HMAC-SHA1".to_owned());
        envelope.insert("oauth_timestamp".to_owned(), TIMESTAMP.to_string());
        envelope.insert("oauth_version".to_owned(), "1.0".to_owned());
        let expected = signature::create(
            "POST",
            "https://sandbox.emailage.com/emailagevalidator/",
            &envelope,
            "token&",
        );
        assert!(query.contains(&format!(
            "oauth_signature={}",
            signature::oauth_encode(&expected)
        )));
    }

    #[test]
    fn prepare_is_deterministic_for_fixed_nonce_and_timestamp() {
        let c = client(HttpMethod::Get);
        let a = c.prepare("", user_params(), Some(NONCE), Some(TIMESTAMP));
        let b = c.prepare("", user_params(), Some(NONCE), Some(TIMESTAMP));
        assert_eq!(a.url, b.url);
    }

    #[test]
    fn replacing_credentials_changes_the_signature() {
        let mut c = client(HttpMethod::Get);
        let before = c.prepare("", user_params(), Some(NONCE), Some(TIMESTAMP));
        c.set_credentials("other-secret", "other-token");
        let after = c.prepare("", user_params(), Some(NONCE), Some(TIMESTAMP));
        assert_ne!(before.url, after.url);
    }

    #[test]
    fn decodes_bom_prefixed_response() {
        let decoded = decode_response("\u{feff}{\"success\":[true]}").unwrap();
        assert_eq!(
            decoded.body["success"],
            serde_json::json!([true])
        );
        assert!(decoded.response_status.is_none());
    }

    #[test]
    fn decodes_response_with_leading_noise() {
        let decoded = decode_response("garbage{\"success\":[true]}").unwrap();
        assert_eq!(decoded.body["success"], serde_json::json!([true]));
    }

    #[test]
    fn decodes_response_status_envelope() {
        let decoded = decode_response(
            "{\"query\":{\"email\":\"a@b.co\"},\"responseStatus\":{\"status\":\"success\",\"errorCode\":\"0\",\"description\":\"\"}}",
        )
        .unwrap();
        let status = decoded.response_status.unwrap();
        assert_eq!(status.status, "success");
        assert_eq!(status.error_code, "0");
        assert!(decoded.body.contains_key("query"));
    }

    #[test]
    fn empty_body_is_a_hard_failure() {
        assert!(matches!(
            decode_response(""),
            Err(EmailageError::EmptyResponse)
        ));
        assert!(matches!(
            decode_response("no json here"),
            Err(EmailageError::EmptyResponse)
        ));
    }

    #[test]
    fn truncated_json_is_a_json_error() {
        assert!(matches!(
            decode_response("{\"success\":"),
            Err(EmailageError::Json(_))
        ));
    }
}
