//! NotifyNextInWaitlistHandler - offer open seats to the queue head.
//!
//! Run by an operator or a scheduled trigger when seats open up. The
//! caller decides how many offers to send; sending the offer email
//! itself is the caller's concern, this handler owns only the state
//! transition and its timestamps.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::ports::WaitlistStore;

use super::WaitlistError;

#[derive(Debug, Clone)]
pub struct NotifyNextInWaitlistCommand {
    /// Upper bound on offers to send this invocation.
    pub count: u32,
}

pub struct NotifyNextInWaitlistHandler {
    waitlist: Arc<dyn WaitlistStore>,
    /// Days an offer stays open before expiring, from configuration.
    notification_window_days: i64,
}

impl NotifyNextInWaitlistHandler {
    pub fn new(waitlist: Arc<dyn WaitlistStore>, notification_window_days: i64) -> Self {
        Self {
            waitlist,
            notification_window_days,
        }
    }

    /// Transitions up to `count` oldest pending entries to notified and
    /// returns how many were actually notified, which is less than
    /// requested when the queue is shorter.
    pub async fn handle(
        &self,
        command: NotifyNextInWaitlistCommand,
    ) -> Result<u64, WaitlistError> {
        let candidates = self.waitlist.list_oldest_pending(command.count).await?;
        let now = Timestamp::now();

        let mut notified = 0u64;
        for mut entry in candidates {
            if let Err(err) = entry.notify(now, self.notification_window_days) {
                // The entry moved out of pending between the list and
                // this transition. Skip it, someone else won.
                tracing::warn!(
                    entry_id = %entry.id,
                    error = %err,
                    "skipping waitlist entry that left pending state"
                );
                continue;
            }
            self.waitlist.update(&entry).await?;
            notified += 1;
        }

        tracing::info!(
            requested = command.count,
            notified,
            window_days = self.notification_window_days,
            "notified waitlist entries"
        );
        Ok(notified)
    }
}
