//! Subscription status state machine.
//!
//! Status is kept current by the billing-provider webhook collaborator;
//! the quota gate only ever reads it.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Subscription billing status.
///
/// The sole authority for "is this subscription usable right now":
/// only `Active` passes the quota gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Fully paid (or free-tier) subscription.
    Active,

    /// Administratively disabled. No access.
    Inactive,

    /// In a trial period awaiting first payment.
    Trialing,

    /// Payment failed; billing provider is retrying.
    PastDue,

    /// User cancelled. No access until resubscribed.
    Canceled,

    /// Payment retries exhausted. No access.
    Unpaid,
}

impl SubscriptionStatus {
    /// Returns true if this status passes the quota gate.
    ///
    /// Deliberately strict: trialing and past-due users are routed to
    /// the billing flow by the caller, not quietly admitted.
    pub fn is_usable(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    /// Lowercase wire name, as stored and as rendered in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Unpaid => "unpaid",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            // From ACTIVE
            (Active, Active) // Renewal
                | (Active, PastDue)
                | (Active, Canceled)
                | (Active, Inactive)
            // From INACTIVE
                | (Inactive, Active)
            // From TRIALING
                | (Trialing, Active)
                | (Trialing, Canceled)
                | (Trialing, PastDue)
            // From PAST_DUE
                | (PastDue, Active)
                | (PastDue, Canceled)
                | (PastDue, Unpaid)
            // From CANCELED
                | (Canceled, Active) // Resubscribe
            // From UNPAID
                | (Unpaid, Active) // Payment recovered
                | (Unpaid, Canceled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            Active => vec![Active, PastDue, Canceled, Inactive],
            Inactive => vec![Active],
            Trialing => vec![Active, Canceled, PastDue],
            PastDue => vec![Active, Canceled, Unpaid],
            Canceled => vec![Active],
            Unpaid => vec![Active, Canceled],
        }
    }
}
