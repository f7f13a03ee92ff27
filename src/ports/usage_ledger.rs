//! UsageLedger port - the append-only record of billable actions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::usage::UsageEntry;

/// Persistence port for the usage ledger.
///
/// Append-only: entries are never updated or deleted by normal flows.
/// Counting within a window is the sole read the quota gate needs.
#[async_trait]
pub trait UsageLedger: Send + Sync {
    /// Appends one entry.
    async fn append(&self, entry: &UsageEntry) -> Result<(), DomainError>;

    /// Counts a user's entries with `created_at >= since`.
    ///
    /// Callers pass the start of the current calendar month to obtain
    /// the authoritative usage-this-period figure.
    async fn count_since(&self, user_id: &UserId, since: Timestamp) -> Result<u64, DomainError>;
}
