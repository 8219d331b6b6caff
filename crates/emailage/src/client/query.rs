//! Risk score query operations.

use std::collections::BTreeMap;

use tracing::info;

use super::EmailageClient;
use crate::error::EmailageError;
use crate::types::ApiResponse;
use crate::validation;

impl EmailageClient {
    /// Query risk score information for an email address, IP address, or a
    /// pre-joined combination, without validating the target.
    ///
    /// `extra` carries additional request parameters from the API
    /// documentation, e.g. `urid` (a user-defined record ID echoed back in
    /// the result).
    pub fn query(
        &self,
        target: &str,
        extra: &[(&str, &str)],
    ) -> Result<ApiResponse, EmailageError> {
        info!("Querying risk score for {target}");
        let mut params = to_params(extra);
        params.insert("query".to_owned(), target.to_owned());
        self.request("", params)
    }

    /// Query risk score information for an email address.
    ///
    /// Differs from [`query`](Self::query) in that the address is validated
    /// first.
    pub fn query_email(
        &self,
        email: &str,
        extra: &[(&str, &str)],
    ) -> Result<ApiResponse, EmailageError> {
        validation::assert_email(email)?;
        self.query(email, extra)
    }

    /// Query risk score information for an IP address.
    ///
    /// Differs from [`query`](Self::query) in that the address is validated
    /// first.
    pub fn query_ip_address(
        &self,
        ip: &str,
        extra: &[(&str, &str)],
    ) -> Result<ApiResponse, EmailageError> {
        validation::assert_ip(ip)?;
        self.query(ip, extra)
    }

    /// Query risk score information for a combination of an email and an IP
    /// address. Both are validated, then joined with `+` into the single
    /// `query` field.
    pub fn query_email_and_ip_address(
        &self,
        email: &str,
        ip: &str,
        extra: &[(&str, &str)],
    ) -> Result<ApiResponse, EmailageError> {
        validation::assert_email(email)?;
        validation::assert_ip(ip)?;
        self.query(&join_target(email, ip), extra)
    }
}

fn join_target(email: &str, ip: &str) -> String {
    format!("{email}+{ip}")
}

fn to_params(extra: &[(&str, &str)]) -> BTreeMap<String, String> {
    extra
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}
