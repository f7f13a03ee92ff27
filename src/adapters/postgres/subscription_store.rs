//! PostgreSQL implementation of SubscriptionStore.
//!
//! One row per user, enforced by a unique constraint on `user_id`. The
//! duplicate-key mapping to `SubscriptionExists` is what makes the
//! bootstrap handler's check-then-insert idempotent under races.

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::plan::PlanTier;
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::ports::SubscriptionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the SubscriptionStore port.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Creates a new PostgresSubscriptionStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: String,
    tier: String,
    status: String,
    current_period_start: Option<DateTime<Utc>>,
    current_period_end: Option<DateTime<Utc>>,
    cancel_at_period_end: bool,
    billing_customer_ref: Option<String>,
    billing_subscription_ref: Option<String>,
    created_at: DateTime<Utc>,
}

fn parse_tier(s: &str) -> Result<PlanTier, DomainError> {
    s.parse::<PlanTier>()
        .map_err(|_| DomainError::new(ErrorCode::DatabaseError, format!("Invalid tier value: {}", s)))
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "active" => Ok(SubscriptionStatus::Active),
        "inactive" => Ok(SubscriptionStatus::Inactive),
        "trialing" => Ok(SubscriptionStatus::Trialing),
        "past_due" => Ok(SubscriptionStatus::PastDue),
        "canceled" => Ok(SubscriptionStatus::Canceled),
        "unpaid" => Ok(SubscriptionStatus::Unpaid),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn tier_to_string(tier: &PlanTier) -> &'static str {
    match tier {
        PlanTier::Free => "free",
        PlanTier::Pro => "pro",
        PlanTier::Enterprise => "enterprise",
    }
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let tier = parse_tier(&row.tier)?;
        let status = parse_status(&row.status)?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            tier,
            status,
            current_period_start: row.current_period_start.map(Timestamp::from_datetime),
            current_period_end: row.current_period_end.map(Timestamp::from_datetime),
            cancel_at_period_end: row.cancel_at_period_end,
            billing_customer_ref: row.billing_customer_ref,
            billing_subscription_ref: row.billing_subscription_ref,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, tier, status, current_period_start, current_period_end,
                   cancel_at_period_end, billing_customer_ref, billing_subscription_ref,
                   created_at
            FROM subscriptions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get subscription: {}", e),
            )
        })?;

        row.map(Subscription::try_from).transpose()
    }

    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, tier, status, current_period_start, current_period_end,
                cancel_at_period_end, billing_customer_ref, billing_subscription_ref,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.user_id.as_str())
        .bind(tier_to_string(&subscription.tier))
        .bind(subscription.status.as_str())
        .bind(subscription.current_period_start.map(|t| *t.as_datetime()))
        .bind(subscription.current_period_end.map(|t| *t.as_datetime()))
        .bind(subscription.cancel_at_period_end)
        .bind(&subscription.billing_customer_ref)
        .bind(&subscription.billing_subscription_ref)
        .bind(subscription.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("subscriptions_user_id_key") {
                    return DomainError::new(
                        ErrorCode::SubscriptionExists,
                        "User already has a subscription",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert subscription: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update_status(
        &self,
        user_id: &UserId,
        status: SubscriptionStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET status = $2
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update subscription status: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("No subscription for user: {}", user_id),
            ));
        }

        Ok(())
    }

    async fn count_active_paid(&self) -> Result<u64, DomainError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM subscriptions
            WHERE status = 'active' AND tier <> 'free'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count paid subscriptions: {}", e),
            )
        })?;

        Ok(count.0.max(0) as u64)
    }
}
