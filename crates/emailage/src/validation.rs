//! Request argument validation.
//!
//! Checks run before any network call; a failure never reaches the wire.

use std::net::Ipv6Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// `local@domain` with at least one dot in the domain part.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@([^@\s]+\.)+[^@\s]+$").unwrap());

/// Dotted-quad shape; octet ranges are checked separately.
static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").unwrap());

/// Check that `email` is of the form `local@domain-with-at-least-one-dot`.
pub fn assert_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_owned()))
    }
}

/// Check that `ip` is an IPv4 dotted quad (each octet 0-255) or an IPv6
/// literal accepted by the standard library parser.
pub fn assert_ip(ip: &str) -> Result<(), ValidationError> {
    if is_ipv4(ip) || ip.parse::<Ipv6Addr>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::InvalidIp(ip.to_owned()))
    }
}

fn is_ipv4(ip: &str) -> bool {
    IPV4_RE
        .captures(ip)
        .is_some_and(|caps| (1..=4).all(|i| caps[i].parse::<u8>().is_ok()))
}
