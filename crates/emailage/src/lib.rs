//! Client for the Emailage email and IP fraud-risk scoring API.
//!
//! Issues signed HTTP requests for risk score queries and feedback flags.
//! Every request carries an OAuth 1.0 HMAC-SHA1 signature computed over the
//! normalized parameter set, as the service requires.
//!
//! # Example
//!
//! ```no_run
//! use emailage::{ClientConfig, EmailageClient, Environment};
//!
//! # fn main() -> Result<(), emailage::EmailageError> {
//! let client = EmailageClient::with_config(
//!     "secret",
//!     "token",
//!     &ClientConfig {
//!         environment: Environment::Sandbox,
//!         ..ClientConfig::default()
//!     },
//! );
//!
//! let response = client.query_email("test@example.com", &[("urid", "1234567890")])?;
//! println!("{:?}", response.response_status);
//! # Ok(())
//! # }
//! ```

// API client
mod client;
pub use client::{ClientConfig, EmailageClient, Environment, FraudCode, HttpMethod};

// OAuth request signing
pub mod oauth;

// Response types
mod types;
pub use types::{ApiResponse, ResponseStatus};

// Argument validation
pub mod validation;

// Errors
pub mod error;
pub use error::{EmailageError, ValidationError};
