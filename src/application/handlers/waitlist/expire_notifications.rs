//! ExpireNotificationsHandler - reclaim lapsed seat offers.
//!
//! Intended to run on a scheduled trigger. Expired entries stop
//! blocking their email from re-registering.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::ports::WaitlistStore;

use super::WaitlistError;

pub struct ExpireNotificationsHandler {
    waitlist: Arc<dyn WaitlistStore>,
}

impl ExpireNotificationsHandler {
    pub fn new(waitlist: Arc<dyn WaitlistStore>) -> Self {
        Self { waitlist }
    }

    /// Expires every notified entry whose offer deadline has passed and
    /// returns the number transitioned.
    pub async fn handle(&self) -> Result<u64, WaitlistError> {
        let now = Timestamp::now();
        let lapsed = self.waitlist.list_notified_expired_before(now).await?;

        let mut expired = 0u64;
        for mut entry in lapsed {
            match entry.expire_if_due(now) {
                Ok(true) => {
                    self.waitlist.update(&entry).await?;
                    expired += 1;
                }
                Ok(false) => {}
                Err(err) => {
                    // Converted or cancelled since the list query.
                    tracing::warn!(
                        entry_id = %entry.id,
                        error = %err,
                        "skipping waitlist entry that left notified state"
                    );
                }
            }
        }

        if expired > 0 {
            tracing::info!(expired, "expired lapsed waitlist notifications");
        }
        Ok(expired)
    }
}
