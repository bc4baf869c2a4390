//! Email address type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Local part, domain, and a final label of at least two letters.
///
/// Applied to the normalized (trimmed, lowercased) address, which makes the
/// check case-insensitive.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email pattern is valid")
});

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty (after trimming).
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not look like `local@domain.tld`.
    #[error("email format is invalid")]
    InvalidFormat,
}

/// A normalized email address.
///
/// Parsing trims surrounding whitespace and lowercases the input, so two
/// spellings of the same address compare equal. The normalized form is the
/// uniqueness key for newsletter subscribers.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Local part: one or more of `a-z 0-9 . _ % + -`
/// - Domain: one or more of `a-z 0-9 . -`, ending in a label of 2+ letters
///
/// ## Examples
///
/// ```
/// use shopfront_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// // Normalization
/// let email = Email::parse("  Jane.Doe@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "jane.doe@example.com");
///
/// // Invalid emails
/// assert!(Email::parse("").is_err());             // empty
/// assert!(Email::parse("no-at-symbol").is_err()); // missing @
/// assert!(Email::parse("user@domain").is_err());  // no top-level label
/// assert!(Email::parse("user@domain.c").is_err()); // label too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse and normalize an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input:
    /// - Is empty
    /// - Is longer than 254 characters
    /// - Does not match `local@domain.tld`
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }

        if normalized.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

/// Returns true if `input` is a well-formed email address.
///
/// Fails closed: empty or malformed input yields `false`, never a panic.
#[must_use]
pub fn validate_email(input: &str) -> bool {
    Email::parse(input).is_ok()
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name@example.com").is_ok());
        assert!(Email::parse("user+tag@example.com").is_ok());
        assert!(Email::parse("user_name%x@example.com").is_ok());
        assert!(Email::parse("user@subdomain.example.com").is_ok());
        assert!(Email::parse("user@example.co.uk").is_ok());
        assert!(Email::parse("a@b.co").is_ok());
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let email = Email::parse("  A@B.COM\n").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
        assert_eq!(email, Email::parse("a@b.com").unwrap());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_format() {
        for input in [
            "no-at-symbol",
            "@domain.com",
            "user@",
            "user@domain",
            "user@domain.c",
            "user@domain.c0m",
            "us er@example.com",
            "user@exa_mple.com",
            "user@@example.com",
        ] {
            assert_eq!(
                Email::parse(input),
                Err(EmailError::InvalidFormat),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_email_fails_closed() {
        assert!(validate_email("Someone@Example.org"));
        assert!(!validate_email(""));
        assert!(!validate_email("not an email"));
        assert!(!validate_email("trailing@dot."));
    }

    #[test]
    fn test_local_part_and_domain() {
        let email = Email::parse("user@example.com").unwrap();
        assert_eq!(email.local_part(), "user");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let parsed: Email = serde_json::from_str("\"User@Example.com\"").unwrap();
        assert_eq!(parsed.as_str(), "user@example.com");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"user@example.com\"");

        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
    }
}
