//! BootstrapSubscriptionHandler - ensures every user has a free-tier
//! subscription row.
//!
//! Invoked on sign-up and defensively on first authenticated request.
//! Idempotent: concurrent calls for the same user race on the unique
//! user constraint, and the loser treats the violation as success and
//! returns the row the winner inserted.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionStore;

#[derive(Debug, Clone)]
pub struct BootstrapSubscriptionCommand {
    pub user_id: UserId,
}

pub struct BootstrapSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionStore>,
}

impl BootstrapSubscriptionHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionStore>) -> Self {
        Self { subscriptions }
    }

    /// Returns the user's subscription, creating a free-tier one if
    /// none exists yet.
    pub async fn handle(
        &self,
        command: BootstrapSubscriptionCommand,
    ) -> Result<Subscription, DomainError> {
        if let Some(existing) = self.subscriptions.find_by_user(&command.user_id).await? {
            return Ok(existing);
        }

        let subscription = Subscription::default_free(command.user_id.clone());
        match self.subscriptions.insert(&subscription).await {
            Ok(()) => {
                tracing::info!(
                    user_id = %command.user_id,
                    subscription_id = %subscription.id,
                    "created free subscription"
                );
                Ok(subscription)
            }
            Err(err) if err.code == ErrorCode::SubscriptionExists => {
                // Lost the insert race; the other writer's row wins.
                tracing::debug!(
                    user_id = %command.user_id,
                    "subscription already created concurrently"
                );
                self.subscriptions
                    .find_by_user(&command.user_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::database(
                            "Subscription vanished after duplicate-key insert",
                        )
                    })
            }
            Err(err) => Err(err),
        }
    }
}
