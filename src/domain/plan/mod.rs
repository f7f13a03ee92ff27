//! Plan catalog domain: tiers, feature flags, and request ceilings.

mod features;
mod limit;
mod plan;
mod tier;

pub use features::PlanFeatures;
pub use limit::MonthlyLimit;
pub use plan::Plan;
pub use tier::PlanTier;
