//! PlanCatalog port - read access to plan definitions.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::plan::{Plan, PlanTier};

/// Read-only catalog of plan definitions.
///
/// Pure lookup; no algorithm beyond keying on the tier. An unknown or
/// missing plan is an error surfaced to the caller, never silently
/// defaulted to unlimited.
#[async_trait]
pub trait PlanCatalog: Send + Sync {
    /// Returns the plan definition for a tier.
    ///
    /// # Errors
    ///
    /// - `PlanNotFound` if the catalog has no definition for the tier
    /// - `DatabaseError` on store failure
    async fn features_of(&self, tier: PlanTier) -> Result<Plan, DomainError>;
}
