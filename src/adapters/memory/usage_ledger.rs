//! In-memory implementation of UsageLedger.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::usage::UsageEntry;
use crate::ports::UsageLedger;

/// Append-only vector of entries.
pub struct InMemoryUsageLedger {
    entries: RwLock<Vec<UsageEntry>>,
}

impl InMemoryUsageLedger {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUsageLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageLedger for InMemoryUsageLedger {
    async fn append(&self, entry: &UsageEntry) -> Result<(), DomainError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn count_since(&self, user_id: &UserId, since: Timestamp) -> Result<u64, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == *user_id && !e.created_at.is_before(&since))
            .count() as u64)
    }
}
