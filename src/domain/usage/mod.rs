//! Usage ledger domain: billable actions and their append-only record.

mod action;
mod entry;

pub use action::{ActionKind, RequiredFeature};
pub use entry::{UsageEntry, UsageMetadata};
