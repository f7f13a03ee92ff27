//! PostgreSQL implementation of PlanCatalog.
//!
//! Plans live in a small operator-managed `plans` table, one row per
//! tier. The `features` column is a JSON document; a ceiling present in
//! it (including an explicit null, meaning unlimited) overrides the
//! plan-level `max_requests_per_month` column.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::plan::{MonthlyLimit, Plan, PlanFeatures, PlanTier};
use crate::ports::PlanCatalog;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of the PlanCatalog port.
pub struct PostgresPlanCatalog {
    pool: PgPool,
}

impl PostgresPlanCatalog {
    /// Creates a new PostgresPlanCatalog with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a plan.
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    tier: String,
    monthly_price_cents: i32,
    features: String,
    max_requests_per_month: Option<i32>,
    max_file_size_bytes: i64,
}

fn parse_tier(s: &str) -> Result<PlanTier, DomainError> {
    s.parse::<PlanTier>()
        .map_err(|_| DomainError::new(ErrorCode::DatabaseError, format!("Invalid tier value: {}", s)))
}

fn tier_to_string(tier: &PlanTier) -> &'static str {
    match tier {
        PlanTier::Free => "free",
        PlanTier::Pro => "pro",
        PlanTier::Enterprise => "enterprise",
    }
}

fn parse_limit_column(value: Option<i32>) -> Result<MonthlyLimit, DomainError> {
    match value {
        // NULL in the plan column means unlimited.
        None => Ok(MonthlyLimit::Unlimited),
        Some(n) => {
            let n = u32::try_from(n).map_err(|_| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Negative request limit: {}", n),
                )
            })?;
            Ok(MonthlyLimit::Limited(n))
        }
    }
}

impl TryFrom<PlanRow> for Plan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let tier = parse_tier(&row.tier)?;
        let features: PlanFeatures = serde_json::from_str(&row.features).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid features document: {}", e),
            )
        })?;
        let max_requests_per_month = parse_limit_column(row.max_requests_per_month)?;
        let monthly_price_cents = u32::try_from(row.monthly_price_cents).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Negative price: {}", row.monthly_price_cents),
            )
        })?;
        let max_file_size_bytes = u64::try_from(row.max_file_size_bytes).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Negative file size limit: {}", row.max_file_size_bytes),
            )
        })?;

        Ok(Plan {
            tier,
            monthly_price_cents,
            features,
            max_requests_per_month,
            max_file_size_bytes,
        })
    }
}

#[async_trait]
impl PlanCatalog for PostgresPlanCatalog {
    async fn features_of(&self, tier: PlanTier) -> Result<Plan, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT tier, monthly_price_cents, features::text AS features,
                   max_requests_per_month, max_file_size_bytes
            FROM plans
            WHERE tier = $1
            "#,
        )
        .bind(tier_to_string(&tier))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load plan: {}", e),
            )
        })?;

        match row {
            Some(row) => Plan::try_from(row),
            None => Err(DomainError::new(
                ErrorCode::PlanNotFound,
                format!("No plan defined for tier: {}", tier),
            )),
        }
    }
}
