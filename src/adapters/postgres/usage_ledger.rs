//! PostgreSQL implementation of UsageLedger.
//!
//! Append-only `usage_entries` table. Counting always goes back to the
//! table; nothing here caches.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::usage::UsageEntry;
use crate::ports::UsageLedger;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of the UsageLedger port.
pub struct PostgresUsageLedger {
    pool: PgPool,
}

impl PostgresUsageLedger {
    /// Creates a new PostgresUsageLedger with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageLedger for PostgresUsageLedger {
    async fn append(&self, entry: &UsageEntry) -> Result<(), DomainError> {
        let metadata = serde_json::to_string(&entry.metadata).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize usage metadata: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO usage_entries (id, user_id, action, metadata, created_at)
            VALUES ($1, $2, $3, $4::jsonb, $5)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_str())
        .bind(entry.action.as_str())
        .bind(metadata)
        .bind(entry.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append usage entry: {}", e),
            )
        })?;

        Ok(())
    }

    async fn count_since(&self, user_id: &UserId, since: Timestamp) -> Result<u64, DomainError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM usage_entries
            WHERE user_id = $1 AND created_at >= $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(since.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count usage entries: {}", e),
            )
        })?;

        Ok(count.0.max(0) as u64)
    }
}
