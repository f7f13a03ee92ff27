//! CheckUpgradeCapacityHandler - may this user start a paid checkout.
//!
//! Asked at checkout initiation. Two concurrent checkouts near the
//! ceiling can both be admitted; the billing webhook is the source of
//! truth for whether a charge landed and corrects over-admission out of
//! band. No reservation lock is taken here.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::ports::SubscriptionStore;

use super::WaitlistError;

#[derive(Debug, Clone)]
pub struct CheckUpgradeCapacityQuery {
    pub user_id: UserId,
}

pub struct CheckUpgradeCapacityHandler {
    subscriptions: Arc<dyn SubscriptionStore>,
    max_paid_users: u64,
}

impl CheckUpgradeCapacityHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionStore>, max_paid_users: u64) -> Self {
        Self {
            subscriptions,
            max_paid_users,
        }
    }

    /// True iff a seat is open, or the user already occupies one.
    ///
    /// A paid user changing plans is already counted in the occupancy
    /// figure and must not be blocked by their own seat.
    pub async fn handle(&self, query: CheckUpgradeCapacityQuery) -> Result<bool, WaitlistError> {
        let subscription = self
            .subscriptions
            .find_by_user(&query.user_id)
            .await
            .map_err(|err| WaitlistError::capacity_check_failed(err.to_string()))?;

        if let Some(sub) = subscription {
            if sub.holds_paid_seat() {
                return Ok(true);
            }
        }

        let paid_count = self
            .subscriptions
            .count_active_paid()
            .await
            .map_err(|err| WaitlistError::capacity_check_failed(err.to_string()))?;

        Ok(paid_count < self.max_paid_users)
    }
}
