//! Subscription aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    StateMachine, SubscriptionId, Timestamp, UserId, ValidationError,
};
use crate::domain::plan::PlanTier;

use super::SubscriptionStatus;

/// A user's current plan assignment plus billing status.
///
/// Exactly one subscription exists per user; it is created at signup
/// (defaulting to the free tier) and mutated by billing webhooks and
/// admin actions, never hard-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,

    /// Owning user (1:1).
    pub user_id: UserId,

    /// Assigned plan tier.
    pub tier: PlanTier,

    /// Billing status; sole authority for gate admission.
    pub status: SubscriptionStatus,

    /// Start of the current billing period, if the billing provider has
    /// reported one.
    pub current_period_start: Option<Timestamp>,

    /// End of the current billing period.
    pub current_period_end: Option<Timestamp>,

    /// Whether the subscription lapses instead of renewing at period end.
    pub cancel_at_period_end: bool,

    /// Billing-provider customer reference.
    pub billing_customer_ref: Option<String>,

    /// Billing-provider subscription reference.
    pub billing_subscription_ref: Option<String>,

    /// When this row was created.
    pub created_at: Timestamp,
}

impl Subscription {
    /// Creates the default free-tier subscription assigned at signup.
    pub fn default_free(user_id: UserId) -> Self {
        Self {
            id: SubscriptionId::new(),
            user_id,
            tier: PlanTier::Free,
            status: SubscriptionStatus::Active,
            current_period_start: None,
            current_period_end: None,
            cancel_at_period_end: false,
            billing_customer_ref: None,
            billing_subscription_ref: None,
            created_at: Timestamp::now(),
        }
    }

    /// Returns true if this subscription currently passes the quota gate.
    pub fn is_usable(&self) -> bool {
        self.status.is_usable()
    }

    /// Returns true if this subscription holds a paid seat right now.
    pub fn holds_paid_seat(&self) -> bool {
        self.tier.is_paid() && self.status.is_usable()
    }

    /// Applies a status transition, validating it against the lifecycle
    /// state machine.
    pub fn transition_status(
        &mut self,
        target: SubscriptionStatus,
    ) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(target)?;
        Ok(())
    }
}
