//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A normalized (lowercased, trimmed) email address.
///
/// Waitlist uniqueness is keyed on this, so normalization happens at
/// construction rather than at every comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a normalized email, rejecting obviously malformed input.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let normalized = raw.into().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(ValidationError::invalid_format(
                "email",
                "malformed address",
            ));
        }
        Ok(Self(normalized))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}
