//! OAuth 1.0 HMAC-SHA1 signature generation (RFC 5849 signing process).
//!
//! Pure functions only: given an HTTP method, a URL, a parameter set, and an
//! HMAC key, [`create`] yields the `oauth_signature` value. No I/O, no state.

use std::collections::BTreeMap;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};
use sha1::Sha1;

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986 (space is `%20`, never `+`).
pub fn oauth_encode(input: &str) -> String {
    percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Normalize request parameters (RFC 5849 Section 3.4.1.3.2).
///
/// Keys and values are percent-encoded, joined with `=`, sorted by encoded
/// key then encoded value, and joined with `&`. Deterministic and idempotent
/// for a given parameter set.
pub fn normalize_query_parameters(params: &BTreeMap<String, String>) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (oauth_encode(k), oauth_encode(v)))
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the signature base string (RFC 5849 Section 3.4.1.1).
///
/// The method is uppercased; method, URL, and normalized query are each
/// percent-encoded independently and joined with `&`.
pub fn concatenate_request_elements(method: &str, url: &str, query: &str) -> String {
    format!(
        "{}&{}&{}",
        oauth_encode(&method.to_uppercase()),
        oauth_encode(url),
        oauth_encode(query)
    )
}

/// HMAC-SHA1 digest of the base string (RFC 5849 Section 3.4.2).
///
/// Key and message are the UTF-8 bytes of `hmac_key` and `base_string`.
pub fn hmac_sha1(base_string: &str, hmac_key: &str) -> Vec<u8> {
    let mut mac =
        Hmac::<Sha1>::new_from_slice(hmac_key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base_string.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Base64-encode a digest, stripping any trailing newline.
pub fn encode(digest: &[u8]) -> String {
    let encoded = BASE64_STANDARD.encode(digest);
    encoded.trim_end_matches('\n').to_owned()
}

/// Compute the `oauth_signature` value for a request.
///
/// # Arguments
/// * `method` - HTTP method (`GET` or `POST`)
/// * `url` - Request URL up to and excluding the query string
/// * `params` - Full parameter set to sign
/// * `hmac_key` - Key derived from the consumer token
pub fn create(
    method: &str,
    url: &str,
    params: &BTreeMap<String, String>,
    hmac_key: &str,
) -> String {
    let query = normalize_query_parameters(params);
    let base_string = concatenate_request_elements(method, url, &query);
    let digest = hmac_sha1(&base_string, hmac_key);
    encode(&digest)
}
