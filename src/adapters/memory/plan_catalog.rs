//! In-memory implementation of PlanCatalog.

use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::plan::{Plan, PlanTier};
use crate::ports::PlanCatalog;

/// Stock definition for every tier, built once.
static STOCK_PLANS: Lazy<HashMap<PlanTier, Plan>> = Lazy::new(|| {
    [PlanTier::Free, PlanTier::Pro, PlanTier::Enterprise]
        .into_iter()
        .map(|tier| (tier, Plan::default_for_tier(tier)))
        .collect()
});

/// Serves plans from a fixed map built at construction. Defaults to
/// the stock per-tier definitions; individual plans can be overridden
/// for tests or development runs.
pub struct InMemoryPlanCatalog {
    plans: HashMap<PlanTier, Plan>,
}

impl InMemoryPlanCatalog {
    /// Catalog with the stock definition for every tier.
    pub fn with_defaults() -> Self {
        Self {
            plans: STOCK_PLANS.clone(),
        }
    }

    /// Replaces the plan for its tier.
    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plans.insert(plan.tier, plan);
        self
    }
}

impl Default for InMemoryPlanCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl PlanCatalog for InMemoryPlanCatalog {
    async fn features_of(&self, tier: PlanTier) -> Result<Plan, DomainError> {
        self.plans.get(&tier).cloned().ok_or_else(|| {
            DomainError::new(
                ErrorCode::PlanNotFound,
                format!("No plan defined for tier: {}", tier),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::MonthlyLimit;

    #[tokio::test]
    async fn defaults_cover_every_tier() {
        let catalog = InMemoryPlanCatalog::with_defaults();
        for tier in [PlanTier::Free, PlanTier::Pro, PlanTier::Enterprise] {
            assert_eq!(catalog.features_of(tier).await.unwrap().tier, tier);
        }
    }

    #[tokio::test]
    async fn override_replaces_stock_plan() {
        let mut plan = Plan::default_for_tier(PlanTier::Free);
        plan.max_requests_per_month = MonthlyLimit::Limited(5);
        plan.features.max_requests_per_month = None;

        let catalog = InMemoryPlanCatalog::with_defaults().with_plan(plan);
        let loaded = catalog.features_of(PlanTier::Free).await.unwrap();
        assert_eq!(loaded.monthly_request_limit(), MonthlyLimit::Limited(5));
    }
}
