//! In-memory implementation of WaitlistStore.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, WaitlistEntryId};
use crate::domain::waitlist::{Email, WaitlistEntry, WaitlistStatus};
use crate::ports::WaitlistStore;

/// Vector of entries with the same active-email uniqueness and FIFO
/// `(registered_at, id)` ordering as the database adapter.
pub struct InMemoryWaitlistStore {
    entries: RwLock<Vec<WaitlistEntry>>,
}

impl InMemoryWaitlistStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    fn fifo_key(entry: &WaitlistEntry) -> (Timestamp, WaitlistEntryId) {
        (entry.registered_at, entry.id)
    }
}

impl Default for InMemoryWaitlistStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WaitlistStore for InMemoryWaitlistStore {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.email == entry.email && e.is_active()) {
            return Err(DomainError::new(
                ErrorCode::WaitlistEntryExists,
                "Active waitlist entry already exists for email",
            ));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<WaitlistEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|e| e.email == *email && e.is_active())
            .cloned())
    }

    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::WaitlistEntryNotFound,
                format!("No waitlist entry for id: {}", entry.id),
            )),
        }
    }

    async fn list_oldest_pending(&self, limit: u32) -> Result<Vec<WaitlistEntry>, DomainError> {
        let entries = self.entries.read().await;
        let mut pending: Vec<WaitlistEntry> = entries
            .iter()
            .filter(|e| e.status == WaitlistStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(Self::fifo_key);
        pending.truncate(limit as usize);
        Ok(pending)
    }

    async fn list_notified_expired_before(
        &self,
        now: Timestamp,
    ) -> Result<Vec<WaitlistEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| {
                e.status == WaitlistStatus::Notified
                    && e.notification_expires_at
                        .map(|deadline| deadline.is_before(&now))
                        .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn count_pending_ahead_of(
        &self,
        registered_at: Timestamp,
        id: WaitlistEntryId,
    ) -> Result<u64, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| {
                e.status == WaitlistStatus::Pending && Self::fifo_key(e) < (registered_at, id)
            })
            .count() as u64)
    }

    async fn count_active(&self) -> Result<u64, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|e| e.is_active()).count() as u64)
    }
}
