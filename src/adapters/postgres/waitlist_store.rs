//! PostgreSQL implementation of WaitlistStore.
//!
//! Per-email uniqueness among active entries is a partial unique index
//! over rows whose status is pending or notified, so a cancelled or
//! expired registration frees the email for another attempt. FIFO
//! order is `(registered_at, id)` everywhere it matters.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, WaitlistEntryId};
use crate::domain::waitlist::{Email, WaitlistEntry, WaitlistStatus};
use crate::ports::WaitlistStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the WaitlistStore port.
pub struct PostgresWaitlistStore {
    pool: PgPool,
}

impl PostgresWaitlistStore {
    /// Creates a new PostgresWaitlistStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a waitlist entry.
#[derive(Debug, sqlx::FromRow)]
struct WaitlistEntryRow {
    id: Uuid,
    email: String,
    name: Option<String>,
    status: String,
    registered_at: DateTime<Utc>,
    notified_at: Option<DateTime<Utc>>,
    notification_expires_at: Option<DateTime<Utc>>,
}

fn parse_status(s: &str) -> Result<WaitlistStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(WaitlistStatus::Pending),
        "notified" => Ok(WaitlistStatus::Notified),
        "converted" => Ok(WaitlistStatus::Converted),
        "expired" => Ok(WaitlistStatus::Expired),
        "cancelled" => Ok(WaitlistStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn status_to_string(status: &WaitlistStatus) -> &'static str {
    match status {
        WaitlistStatus::Pending => "pending",
        WaitlistStatus::Notified => "notified",
        WaitlistStatus::Converted => "converted",
        WaitlistStatus::Expired => "expired",
        WaitlistStatus::Cancelled => "cancelled",
    }
}

impl TryFrom<WaitlistEntryRow> for WaitlistEntry {
    type Error = DomainError;

    fn try_from(row: WaitlistEntryRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;

        Ok(WaitlistEntry {
            id: WaitlistEntryId::from_uuid(row.id),
            email: Email::new(row.email).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid email: {}", e))
            })?,
            name: row.name,
            status,
            registered_at: Timestamp::from_datetime(row.registered_at),
            notified_at: row.notified_at.map(Timestamp::from_datetime),
            notification_expires_at: row.notification_expires_at.map(Timestamp::from_datetime),
        })
    }
}

#[async_trait]
impl WaitlistStore for PostgresWaitlistStore {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO waitlist_entries (
                id, email, name, status, registered_at, notified_at,
                notification_expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.email.as_str())
        .bind(&entry.name)
        .bind(status_to_string(&entry.status))
        .bind(entry.registered_at.as_datetime())
        .bind(entry.notified_at.map(|t| *t.as_datetime()))
        .bind(entry.notification_expires_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("waitlist_entries_active_email_key") {
                    return DomainError::new(
                        ErrorCode::WaitlistEntryExists,
                        "Active waitlist entry already exists for email",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert waitlist entry: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<WaitlistEntry>, DomainError> {
        let row: Option<WaitlistEntryRow> = sqlx::query_as(
            r#"
            SELECT id, email, name, status, registered_at, notified_at,
                   notification_expires_at
            FROM waitlist_entries
            WHERE email = $1 AND status IN ('pending', 'notified')
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find waitlist entry: {}", e),
            )
        })?;

        row.map(WaitlistEntry::try_from).transpose()
    }

    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE waitlist_entries SET
                status = $2,
                notified_at = $3,
                notification_expires_at = $4
            WHERE id = $1
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(status_to_string(&entry.status))
        .bind(entry.notified_at.map(|t| *t.as_datetime()))
        .bind(entry.notification_expires_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update waitlist entry: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::WaitlistEntryNotFound,
                format!("No waitlist entry for id: {}", entry.id),
            ));
        }

        Ok(())
    }

    async fn list_oldest_pending(&self, limit: u32) -> Result<Vec<WaitlistEntry>, DomainError> {
        let rows: Vec<WaitlistEntryRow> = sqlx::query_as(
            r#"
            SELECT id, email, name, status, registered_at, notified_at,
                   notification_expires_at
            FROM waitlist_entries
            WHERE status = 'pending'
            ORDER BY registered_at ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list pending waitlist entries: {}", e),
            )
        })?;

        rows.into_iter().map(WaitlistEntry::try_from).collect()
    }

    async fn list_notified_expired_before(
        &self,
        now: Timestamp,
    ) -> Result<Vec<WaitlistEntry>, DomainError> {
        let rows: Vec<WaitlistEntryRow> = sqlx::query_as(
            r#"
            SELECT id, email, name, status, registered_at, notified_at,
                   notification_expires_at
            FROM waitlist_entries
            WHERE status = 'notified' AND notification_expires_at < $1
            "#,
        )
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list expired notifications: {}", e),
            )
        })?;

        rows.into_iter().map(WaitlistEntry::try_from).collect()
    }

    async fn count_pending_ahead_of(
        &self,
        registered_at: Timestamp,
        id: WaitlistEntryId,
    ) -> Result<u64, DomainError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM waitlist_entries
            WHERE status = 'pending'
              AND (registered_at < $1 OR (registered_at = $1 AND id < $2))
            "#,
        )
        .bind(registered_at.as_datetime())
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count waitlist entries ahead: {}", e),
            )
        })?;

        Ok(count.0.max(0) as u64)
    }

    async fn count_active(&self) -> Result<u64, DomainError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM waitlist_entries
            WHERE status IN ('pending', 'notified')
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count active waitlist entries: {}", e),
            )
        })?;

        Ok(count.0.max(0) as u64)
    }
}
