//! Shared in-memory waitlist store for the handler tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, WaitlistEntryId};
use crate::domain::waitlist::{Email, WaitlistEntry, WaitlistStatus};
use crate::ports::WaitlistStore;

pub struct InMemoryWaitlist {
    entries: Mutex<Vec<WaitlistEntry>>,
    pub fail: Mutex<bool>,
}

impl InMemoryWaitlist {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
        }
    }

    /// Seeds a pending entry with a registration time strictly later
    /// than every entry already stored, preserving FIFO order across
    /// fast successive calls.
    pub async fn seed_pending(&self, email: &str) -> WaitlistEntryId {
        let mut entries = self.entries.lock().await;
        let mut entry = WaitlistEntry::register(Email::new(email).unwrap(), None);
        let last = entries.last().map(|e| e.registered_at);
        if let Some(last) = last {
            if !last.is_before(&entry.registered_at) {
                entry.registered_at = last.plus_secs(1);
            }
        }
        let id = entry.id;
        entries.push(entry);
        id
    }

    pub async fn set_status(&self, id: WaitlistEntryId, status: WaitlistStatus) {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
            entry.status = status;
        }
    }

    pub async fn get(&self, id: WaitlistEntryId) -> Option<WaitlistEntry> {
        self.entries.lock().await.iter().find(|e| e.id == id).cloned()
    }

    async fn check_fail(&self) -> Result<(), DomainError> {
        if *self.fail.lock().await {
            return Err(DomainError::database("Simulated store failure"));
        }
        Ok(())
    }

    fn fifo_key(entry: &WaitlistEntry) -> (Timestamp, WaitlistEntryId) {
        (entry.registered_at, entry.id)
    }
}

#[async_trait]
impl WaitlistStore for InMemoryWaitlist {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        self.check_fail().await?;
        let mut entries = self.entries.lock().await;
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
        self.check_fail().await?;
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .find(|e| e.email == *email && e.is_active())
            .cloned())
    }

    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        self.check_fail().await?;
        let mut entries = self.entries.lock().await;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::WaitlistEntryNotFound,
                "No waitlist entry for id",
            )),
        }
    }

    async fn list_oldest_pending(&self, limit: u32) -> Result<Vec<WaitlistEntry>, DomainError> {
        self.check_fail().await?;
        let entries = self.entries.lock().await;
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
        self.check_fail().await?;
        let entries = self.entries.lock().await;
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
        self.check_fail().await?;
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| {
                e.status == WaitlistStatus::Pending
                    && Self::fifo_key(e) < (registered_at, id)
            })
            .count() as u64)
    }

    async fn count_active(&self) -> Result<u64, DomainError> {
        self.check_fail().await?;
        let entries = self.entries.lock().await;
        Ok(entries.iter().filter(|e| e.is_active()).count() as u64)
    }
}
