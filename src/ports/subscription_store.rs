//! SubscriptionStore port - persistence for the one-subscription-per-user
//! relation.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{Subscription, SubscriptionStatus};

/// Persistence port for subscriptions.
///
/// Implementations must enforce the unique user_id constraint; the
/// idempotent signup bootstrap depends on `insert` surfacing a
/// violation as `SubscriptionExists` rather than a generic failure.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Find a user's subscription.
    ///
    /// Returns `None` if the user has none. This is the primary lookup
    /// since each user has at most one subscription.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError>;

    /// Insert a new subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionExists` if the user already has one (unique
    ///   violation on user_id)
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Persist a status change for an existing subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if no row exists for the user
    /// - `DatabaseError` on persistence failure
    async fn update_status(
        &self,
        user_id: &UserId,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError>;

    /// Count users currently holding an active paid (non-free) plan.
    ///
    /// Re-read on every admission decision; never cached.
    async fn count_active_paid(&self) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SubscriptionStore) {}
    }
}
