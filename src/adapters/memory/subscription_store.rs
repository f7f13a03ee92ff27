//! In-memory implementation of SubscriptionStore.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::ports::SubscriptionStore;

/// Map keyed by user id; one subscription per user, like the database
/// unique constraint.
pub struct InMemorySubscriptionStore {
    subscriptions: RwLock<HashMap<String, Subscription>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.get(user_id.as_str()).cloned())
    }

    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        let key = subscription.user_id.as_str().to_string();
        if subscriptions.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::SubscriptionExists,
                "User already has a subscription",
            ));
        }
        subscriptions.insert(key, subscription.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        user_id: &UserId,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        match subscriptions.get_mut(user_id.as_str()) {
            Some(subscription) => {
                subscription.status = status;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("No subscription for user: {}", user_id),
            )),
        }
    }

    async fn count_active_paid(&self) -> Result<u64, DomainError> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions
            .values()
            .filter(|s| s.holds_paid_seat())
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::PlanTier;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let store = InMemorySubscriptionStore::new();
        let sub = Subscription::default_free(user("u1"));
        store.insert(&sub).await.unwrap();

        let found = store.find_by_user(&user("u1")).await.unwrap().unwrap();
        assert_eq!(found.id, sub.id);
        assert!(store.find_by_user(&user("u2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_insert_for_same_user_is_a_duplicate() {
        let store = InMemorySubscriptionStore::new();
        store
            .insert(&Subscription::default_free(user("u1")))
            .await
            .unwrap();

        let err = store
            .insert(&Subscription::default_free(user("u1")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubscriptionExists);
    }

    #[tokio::test]
    async fn update_status_on_missing_user_fails() {
        let store = InMemorySubscriptionStore::new();
        let err = store
            .update_status(&user("ghost"), SubscriptionStatus::Canceled)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubscriptionNotFound);
    }

    #[tokio::test]
    async fn paid_count_tracks_tier_and_status() {
        let store = InMemorySubscriptionStore::new();

        let mut paid = Subscription::default_free(user("paid"));
        paid.tier = PlanTier::Pro;
        store.insert(&paid).await.unwrap();

        let free = Subscription::default_free(user("free"));
        store.insert(&free).await.unwrap();

        let mut lapsed = Subscription::default_free(user("lapsed"));
        lapsed.tier = PlanTier::Enterprise;
        lapsed.status = SubscriptionStatus::Canceled;
        store.insert(&lapsed).await.unwrap();

        assert_eq!(store.count_active_paid().await.unwrap(), 1);
    }
}
