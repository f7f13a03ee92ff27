//! PostgreSQL adapters - database implementations of the persistence ports.

mod plan_catalog;
mod subscription_store;
mod usage_ledger;
mod waitlist_store;

pub use plan_catalog::PostgresPlanCatalog;
pub use subscription_store::PostgresSubscriptionStore;
pub use usage_ledger::PostgresUsageLedger;
pub use waitlist_store::PostgresWaitlistStore;
