//! Append-only usage ledger entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::foundation::{Timestamp, UsageEntryId, UserId};

use super::ActionKind;

/// Free-form context attached to a ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Generation mode (e.g. model or quality preset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Identifier of the produced resource, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    /// Length of the prompt in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_length: Option<u32>,

    /// Whether the action edited an existing resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_editing: Option<bool>,

    /// Anything else worth keeping.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

/// One row of the usage ledger.
///
/// Never updated or deleted by normal flows. The count of a user's
/// entries at or after the start of the current calendar month is the
/// authoritative usage figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    /// Entry ID.
    pub id: UsageEntryId,

    /// User who performed the action.
    pub user_id: UserId,

    /// Kind of billable action.
    pub action: ActionKind,

    /// Free-form context.
    pub metadata: UsageMetadata,

    /// When the action succeeded.
    pub created_at: Timestamp,
}

impl UsageEntry {
    /// Creates an entry stamped now.
    pub fn new(user_id: UserId, action: ActionKind, metadata: UsageMetadata) -> Self {
        Self {
            id: UsageEntryId::new(),
            user_id,
            action,
            metadata,
            created_at: Timestamp::now(),
        }
    }
}
