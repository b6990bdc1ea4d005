//! IPv4 validation and the literal-scanning pattern.
//!
//! Two views of "an IPv4 address" live here:
//! - [`is_valid_ipv4`] / [`validate_ipv4`] - strict validation of a whole token
//! - [`ipv4_pattern`] - the regex used to find IPv4 literals inside free text

use regex::bytes::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use crate::error::NotesError;

/// Four dot-separated 0-255 octets, unanchored so it can be found inside text.
const IPV4_LITERAL: &str =
    r"(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(IPV4_LITERAL).unwrap_or_else(|e| panic!("invalid IPv4 pattern: {e}"))
});

/// Check whether a token is a dotted-quad IPv4 address.
///
/// The whole token must be the address: no surrounding whitespace,
/// no CIDR suffix, no IPv6.
///
/// # Examples
/// ```
/// use ipnotes::validation::is_valid_ipv4;
/// assert!(is_valid_ipv4("192.168.1.1"));
/// assert!(!is_valid_ipv4("256.0.0.1"));
/// assert!(!is_valid_ipv4("::1"));
/// ```
pub fn is_valid_ipv4(token: &str) -> bool {
    token.parse::<Ipv4Addr>().is_ok()
}

/// Validate a dotted-quad string and return the parsed address.
///
/// # Examples
/// ```
/// use ipnotes::validation::validate_ipv4;
/// assert!(validate_ipv4("10.0.0.1").is_ok());
/// assert!(validate_ipv4("10.0.0").is_err());
/// ```
pub fn validate_ipv4(token: &str) -> Result<Ipv4Addr, NotesError> {
    token
        .parse()
        .map_err(|_| NotesError::InvalidIp(token.to_string()))
}

/// Pattern matching IPv4 literals embedded in arbitrary bytes.
///
/// Matching is leftmost-first and unanchored: `1.2.3.4567` yields `1.2.3.45`.
pub fn ipv4_pattern() -> &'static Regex {
    &IPV4_REGEX
}
