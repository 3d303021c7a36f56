use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Newsletter opt-in record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate `raw` against a basic `local@domain.tld` pattern.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let email = raw.trim();
        if EMAIL.is_match(email) {
            Ok(Self(email.to_string()))
        } else {
            Err(DomainError::Validation("Invalid email address".to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe rendering: keeps the first character of the local part.
    pub fn masked(&self) -> String {
        match self.0.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
                _ => format!("***@{domain}"),
            },
            None => "***".to_string(),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_basic_addresses() {
        let email = EmailAddress::parse("  reader@example.com ").unwrap();
        assert_eq!(email.as_str(), "reader@example.com");
        assert!(EmailAddress::parse("a.b+c@sub.domain.io").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_addresses() {
        for raw in ["", "plain", "no-at.example.com", "two@@example.com", "a@b", "a b@c.d", "@x.io"] {
            assert!(
                matches!(EmailAddress::parse(raw), Err(DomainError::Validation(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_masked_hides_local_part() {
        let email = EmailAddress::parse("jane@example.com").unwrap();
        assert_eq!(email.masked(), "j***@example.com");
        let short = EmailAddress::parse("j@example.com").unwrap();
        assert_eq!(short.masked(), "***@example.com");
    }
}
