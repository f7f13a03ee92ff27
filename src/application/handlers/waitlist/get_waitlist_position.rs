//! GetWaitlistPositionHandler - live FIFO rank for an email.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::waitlist::{Email, WaitlistEntry};
use crate::ports::WaitlistStore;

use super::WaitlistError;

/// Recomputes an entry's queue position: 1 plus the still-pending
/// entries registered strictly ahead of it. Entries ahead that have
/// since converted, expired, or cancelled no longer count, so ranks
/// shift forward without any stored sequence number.
pub(super) async fn live_position(
    store: &dyn WaitlistStore,
    entry: &WaitlistEntry,
) -> Result<u64, DomainError> {
    let ahead = store
        .count_pending_ahead_of(entry.registered_at, entry.id)
        .await?;
    Ok(ahead + 1)
}

#[derive(Debug, Clone)]
pub struct GetWaitlistPositionQuery {
    pub email: String,
}

pub struct GetWaitlistPositionHandler {
    waitlist: Arc<dyn WaitlistStore>,
}

impl GetWaitlistPositionHandler {
    pub fn new(waitlist: Arc<dyn WaitlistStore>) -> Self {
        Self { waitlist }
    }

    /// Returns the live position, or `None` if the email has no active
    /// registration.
    pub async fn handle(
        &self,
        query: GetWaitlistPositionQuery,
    ) -> Result<Option<u64>, WaitlistError> {
        let email = Email::new(query.email.as_str())
            .map_err(|err| WaitlistError::invalid_email(err.to_string()))?;

        let entry = match self.waitlist.find_active_by_email(&email).await? {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let position = live_position(self.waitlist.as_ref(), &entry).await?;
        Ok(Some(position))
    }
}
