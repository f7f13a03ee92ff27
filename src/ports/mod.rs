//! Ports - interfaces between the decision logic and the outside world.
//!
//! All persistence flows through these traits: point lookups by unique
//! key, count queries bounded by a timestamp, and ordered range scans.
//! Any relational or document store with those primitives suffices.

mod plan_catalog;
mod subscription_store;
mod usage_ledger;
mod waitlist_store;

pub use plan_catalog::PlanCatalog;
pub use subscription_store::SubscriptionStore;
pub use usage_ledger::UsageLedger;
pub use waitlist_store::WaitlistStore;
