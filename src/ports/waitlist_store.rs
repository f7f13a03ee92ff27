//! WaitlistStore port - persistence for waitlist entries.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, WaitlistEntryId};
use crate::domain::waitlist::{Email, WaitlistEntry};

/// Persistence port for the waitlist.
///
/// FIFO order is registration-timestamp ascending with ties broken by
/// entry id; implementations must apply that ordering consistently in
/// `list_oldest_pending` and `count_pending_ahead_of`. Positions are
/// recomputed live from these queries, never stored.
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Insert a freshly registered entry.
    ///
    /// # Errors
    ///
    /// - `WaitlistEntryExists` if an active (pending or notified) entry
    ///   already exists for the email
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), DomainError>;

    /// Find the active (pending or notified) entry for an email.
    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<WaitlistEntry>, DomainError>;

    /// Persist a mutated entry (status transitions and their stamps).
    ///
    /// # Errors
    ///
    /// - `WaitlistEntryNotFound` if no row exists for the id
    /// - `DatabaseError` on persistence failure
    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError>;

    /// List up to `limit` pending entries, oldest first.
    async fn list_oldest_pending(&self, limit: u32) -> Result<Vec<WaitlistEntry>, DomainError>;

    /// List notified entries whose expiry deadline is before `now`.
    async fn list_notified_expired_before(
        &self,
        now: Timestamp,
    ) -> Result<Vec<WaitlistEntry>, DomainError>;

    /// Count still-pending entries registered strictly ahead of the
    /// given entry (earlier timestamp, or equal timestamp with a
    /// smaller id).
    async fn count_pending_ahead_of(
        &self,
        registered_at: Timestamp,
        id: WaitlistEntryId,
    ) -> Result<u64, DomainError>;

    /// Count entries currently pending or notified.
    async fn count_active(&self) -> Result<u64, DomainError>;
}
