//! GetWaitlistStatsHandler - seat occupancy and queue depth snapshot.

use std::sync::Arc;

use crate::domain::waitlist::WaitlistStats;
use crate::ports::{SubscriptionStore, WaitlistStore};

use super::WaitlistError;

pub struct GetWaitlistStatsHandler {
    subscriptions: Arc<dyn SubscriptionStore>,
    waitlist: Arc<dyn WaitlistStore>,
    max_paid_users: u64,
}

impl GetWaitlistStatsHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        waitlist: Arc<dyn WaitlistStore>,
        max_paid_users: u64,
    ) -> Self {
        Self {
            subscriptions,
            waitlist,
            max_paid_users,
        }
    }

    pub async fn handle(&self) -> Result<WaitlistStats, WaitlistError> {
        let paid_users_count = self.subscriptions.count_active_paid().await?;
        let waitlist_count = self.waitlist.count_active().await?;

        Ok(WaitlistStats::derive(
            paid_users_count,
            self.max_paid_users,
            waitlist_count,
        ))
    }
}
