//! Feedback flag operations.

use std::collections::BTreeMap;

use tracing::info;

use super::EmailageClient;
use crate::error::{EmailageError, ValidationError};
use crate::types::ApiResponse;
use crate::validation;

/// Reason an email address is flagged as fraud.
///
/// Numeric codes outside 1-9 coerce to [`FraudCode::Other`] rather than
/// being rejected, matching the service's behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FraudCode {
    /// Card Not Present Fraud.
    CardNotPresent = 1,
    /// Customer Dispute (Chargeback).
    CustomerDispute = 2,
    /// First Party Fraud.
    FirstPartyFraud = 3,
    /// First Payment Default.
    FirstPaymentDefault = 4,
    /// Identity Theft (Fraud Application).
    IdentityTheftFraudApplication = 5,
    /// Identity Theft (Account Take Over).
    IdentityTheftAccountTakeOver = 6,
    /// Suspected Fraud (Not Confirmed).
    SuspectedFraud = 7,
    /// Synthetic ID.
    SyntheticId = 8,
    /// Other; also the catch-all for out-of-range codes.
    Other = 9,
}

impl FraudCode {
    /// Map a numeric code to a fraud reason; anything outside 1-9 becomes
    /// [`FraudCode::Other`].
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => Self::CardNotPresent,
            2 => Self::CustomerDispute,
            3 => Self::FirstPartyFraud,
            4 => Self::FirstPaymentDefault,
            5 => Self::IdentityTheftFraudApplication,
            6 => Self::IdentityTheftAccountTakeOver,
            7 => Self::SuspectedFraud,
            8 => Self::SyntheticId,
            _ => Self::Other,
        }
    }

    /// Wire identifier, sent as `fraudcodeID`.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Human-readable reason as listed in the API documentation.
    pub fn description(self) -> &'static str {
        match self {
            Self::CardNotPresent => "Card Not Present Fraud",
            Self::CustomerDispute => "Customer Dispute (Chargeback)",
            Self::FirstPartyFraud => "First Party Fraud",
            Self::FirstPaymentDefault => "First Payment Default",
            Self::IdentityTheftFraudApplication => "Identity Theft (Fraud Application)",
            Self::IdentityTheftAccountTakeOver => "Identity Theft (Account Take Over)",
            Self::SuspectedFraud => "Suspected Fraud (Not Confirmed)",
            Self::SyntheticId => "Synthetic ID",
            Self::Other => "Other",
        }
    }
}

impl EmailageClient {
    /// Mark an email address as fraud, good, or neutral.
    ///
    /// `fraud_code` is required when `flag` is `fraud` and ignored
    /// otherwise; codes outside 1-9 coerce to 9 (Other).
    pub fn flag(
        &self,
        flag: &str,
        query: &str,
        fraud_code: Option<i64>,
    ) -> Result<ApiResponse, EmailageError> {
        let params = build_flag_params(flag, query, fraud_code)?;
        info!("Flagging {query} as {flag}");
        self.request("/flag", params)
    }

    /// Mark an email address as fraud with a reason code.
    pub fn flag_as_fraud(
        &self,
        query: &str,
        fraud_code: i64,
    ) -> Result<ApiResponse, EmailageError> {
        self.flag("fraud", query, Some(fraud_code))
    }

    /// Mark an email address as good.
    pub fn flag_as_good(&self, query: &str) -> Result<ApiResponse, EmailageError> {
        self.flag("good", query, None)
    }

    /// Unflag an email address previously marked as good or fraud.
    pub fn remove_flag(&self, query: &str) -> Result<ApiResponse, EmailageError> {
        self.flag("neutral", query, None)
    }
}

fn build_flag_params(
    flag: &str,
    query: &str,
    fraud_code: Option<i64>,
) -> Result<BTreeMap<String, String>, ValidationError> {
    if !matches!(flag, "fraud" | "neutral" | "good") {
        return Err(ValidationError::InvalidFlag(flag.to_owned()));
    }
    validation::assert_email(query)?;

    let mut params = BTreeMap::new();
    params.insert("flag".to_owned(), flag.to_owned());
    params.insert("query".to_owned(), query.to_owned());

    if flag == "fraud" {
        let code = fraud_code.ok_or(ValidationError::MissingFraudCode)?;
        params.insert(
            "fraudcodeID".to_owned(),
            FraudCode::from_id(code).id().to_string(),
        );
    }

    Ok(params)
}
