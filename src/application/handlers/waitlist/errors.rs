//! Typed failures shared by the waitlist admission handlers.

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitlistError {
    /// The supplied email did not parse.
    InvalidEmail(String),

    /// An active (pending or notified) registration already exists for
    /// the email. Carries the existing entry's live position so the
    /// caller can answer with it rather than a bare rejection.
    AlreadyOnWaitlist { position: u64 },

    /// The capacity check itself could not determine seat state.
    /// Distinct from a legitimate "at capacity" answer of false.
    CapacityCheckFailed(String),

    /// The store could not be read or written.
    Infrastructure(String),
}

impl WaitlistError {
    pub fn invalid_email(reason: impl Into<String>) -> Self {
        WaitlistError::InvalidEmail(reason.into())
    }

    pub fn capacity_check_failed(reason: impl Into<String>) -> Self {
        WaitlistError::CapacityCheckFailed(reason.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            WaitlistError::InvalidEmail(_) => ErrorCode::InvalidFormat,
            WaitlistError::AlreadyOnWaitlist { .. } => ErrorCode::WaitlistEntryExists,
            WaitlistError::CapacityCheckFailed(_) => ErrorCode::DatabaseError,
            WaitlistError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-presentable message.
    pub fn message(&self) -> String {
        match self {
            WaitlistError::InvalidEmail(reason) => {
                format!("Invalid email address: {}", reason)
            }
            WaitlistError::AlreadyOnWaitlist { position } => {
                format!("Already on the waitlist at position {}", position)
            }
            WaitlistError::CapacityCheckFailed(reason) => {
                format!("Could not determine seat availability: {}", reason)
            }
            WaitlistError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for WaitlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for WaitlistError {}

impl From<DomainError> for WaitlistError {
    fn from(err: DomainError) -> Self {
        WaitlistError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_per_variant() {
        assert_eq!(
            WaitlistError::AlreadyOnWaitlist { position: 3 }.code(),
            ErrorCode::WaitlistEntryExists
        );
        assert_eq!(
            WaitlistError::capacity_check_failed("down").code(),
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn already_on_waitlist_message_carries_position() {
        let err = WaitlistError::AlreadyOnWaitlist { position: 7 };
        assert!(err.message().contains("position 7"));
    }
}
