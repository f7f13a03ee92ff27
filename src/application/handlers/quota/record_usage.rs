//! RecordUsageHandler - appends one usage ledger entry.
//!
//! Called by the action pipeline after the gated work succeeds, so a
//! failed generation never consumes quota. Append-only; the entry is
//! stamped with the current time and never updated afterwards.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::usage::{ActionKind, UsageEntry, UsageMetadata};
use crate::ports::UsageLedger;

/// Command to record one completed billable action.
#[derive(Debug, Clone)]
pub struct RecordUsageCommand {
    pub user_id: UserId,
    pub action: ActionKind,
    pub metadata: UsageMetadata,
}

pub struct RecordUsageHandler {
    ledger: Arc<dyn UsageLedger>,
}

impl RecordUsageHandler {
    pub fn new(ledger: Arc<dyn UsageLedger>) -> Self {
        Self { ledger }
    }

    /// Appends the entry and returns it with its assigned id and
    /// timestamp.
    pub async fn handle(&self, command: RecordUsageCommand) -> Result<UsageEntry, DomainError> {
        let entry = UsageEntry::new(command.user_id, command.action, command.metadata);

        self.ledger.append(&entry).await?;

        tracing::debug!(
            entry_id = %entry.id,
            user_id = %entry.user_id,
            action = %entry.action,
            "usage recorded"
        );

        Ok(entry)
    }
}
