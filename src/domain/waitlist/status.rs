//! Waitlist entry status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Status of a waitlist entry.
///
/// Lifecycle: `pending -> notified -> {converted, expired}`;
/// `pending -> cancelled`; `notified -> cancelled`. `Converted`,
/// `Expired`, and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    /// Registered and waiting for a seat.
    Pending,

    /// Offered a seat; the offer expires at a stamped deadline.
    Notified,

    /// Completed checkout within the notification window.
    Converted,

    /// Notification window lapsed without conversion.
    Expired,

    /// Withdrawn on user request.
    Cancelled,
}

impl WaitlistStatus {
    /// Returns true if this entry still blocks re-registration of its
    /// email.
    pub fn is_active(&self) -> bool {
        matches!(self, WaitlistStatus::Pending | WaitlistStatus::Notified)
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitlistStatus::Pending => "pending",
            WaitlistStatus::Notified => "notified",
            WaitlistStatus::Converted => "converted",
            WaitlistStatus::Expired => "expired",
            WaitlistStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for WaitlistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for WaitlistStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WaitlistStatus::*;
        matches!(
            (self, target),
            (Pending, Notified)
                | (Pending, Cancelled)
                | (Notified, Converted)
                | (Notified, Expired)
                | (Notified, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WaitlistStatus::*;
        match self {
            Pending => vec![Notified, Cancelled],
            Notified => vec![Converted, Expired, Cancelled],
            Converted | Expired | Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_and_notified_are_active() {
        assert!(WaitlistStatus::Pending.is_active());
        assert!(WaitlistStatus::Notified.is_active());
        assert!(!WaitlistStatus::Converted.is_active());
        assert!(!WaitlistStatus::Expired.is_active());
        assert!(!WaitlistStatus::Cancelled.is_active());
    }

    #[test]
    fn pending_can_be_notified_or_cancelled() {
        assert!(WaitlistStatus::Pending.can_transition_to(&WaitlistStatus::Notified));
        assert!(WaitlistStatus::Pending.can_transition_to(&WaitlistStatus::Cancelled));
    }

    #[test]
    fn pending_cannot_convert_directly() {
        assert!(!WaitlistStatus::Pending.can_transition_to(&WaitlistStatus::Converted));
    }

    #[test]
    fn notified_can_convert_expire_or_cancel() {
        assert!(WaitlistStatus::Notified.can_transition_to(&WaitlistStatus::Converted));
        assert!(WaitlistStatus::Notified.can_transition_to(&WaitlistStatus::Expired));
        assert!(WaitlistStatus::Notified.can_transition_to(&WaitlistStatus::Cancelled));
    }

    #[test]
    fn terminal_states_have_no_way_out() {
        assert!(WaitlistStatus::Converted.is_terminal());
        assert!(WaitlistStatus::Expired.is_terminal());
        assert!(WaitlistStatus::Cancelled.is_terminal());
    }

    #[test]
    fn expired_cannot_be_renotified() {
        assert!(!WaitlistStatus::Expired.can_transition_to(&WaitlistStatus::Notified));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&WaitlistStatus::Notified).unwrap();
        assert_eq!(json, "\"notified\"");
    }
}
