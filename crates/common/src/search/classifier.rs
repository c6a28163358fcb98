//! Query Classifier - Recognises the lexical shape of a search query
//!
//! Rules are tested in a fixed priority order and the first match wins:
//! email, phone number, IPv4 address, domain name, then generic term.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Whitespace code points, including the non-breaking and typographic
/// spaces pasted phone numbers often carry
pub(crate) const WHITESPACE: &str =
    r"\t\n\x0B\x0C\r \x{00A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\+?[\d{WHITESPACE}()-]+$")).expect("phone pattern compiles")
});

static IP_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("ip pattern compiles")
});

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .expect("domain pattern compiles")
});

/// Lexical shape of a query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Contains an `@`
    Email,
    /// Digits, spaces, dashes and parentheses with an optional leading `+`
    Phone,
    /// Dotted quad of 1-3 digit groups
    IpAddress,
    /// `label.tld` with a 2+ letter TLD
    Domain,
    /// Names, handles, companies and everything else
    GenericTerm,
}

impl QueryKind {
    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Email => "email",
            QueryKind::Phone => "phone",
            QueryKind::IpAddress => "ip_address",
            QueryKind::Domain => "domain",
            QueryKind::GenericTerm => "generic_term",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a query. The phone rule is permissive and is tested before the
/// IP and domain rules, so a bare number like `12345` is a phone number.
pub fn classify(query: &str) -> QueryKind {
    if query.contains('@') {
        return QueryKind::Email;
    }

    if PHONE.is_match(query) {
        return QueryKind::Phone;
    }

    if IP_ADDRESS.is_match(query) {
        return QueryKind::IpAddress;
    }

    if DOMAIN.is_match(query) {
        return QueryKind::Domain;
    }

    QueryKind::GenericTerm
}
