//! In-memory adapters - lock-based implementations of the persistence
//! ports for tests and single-process development runs.

mod plan_catalog;
mod subscription_store;
mod usage_ledger;
mod waitlist_store;

pub use plan_catalog::InMemoryPlanCatalog;
pub use subscription_store::InMemorySubscriptionStore;
pub use usage_ledger::InMemoryUsageLedger;
pub use waitlist_store::InMemoryWaitlistStore;
