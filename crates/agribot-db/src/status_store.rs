//! Status-check persistence in `PostgreSQL`.

use agribot_types::{StatusCheck, StatusCheckId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `status_checks` table.
pub struct StatusStore<'a> {
    pool: &'a PgPool,
}

impl<'a> StatusStore<'a> {
    /// Create a new status store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a status check.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, check: &StatusCheck) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO status_checks (id, client_name, timestamp)
              VALUES ($1, $2, $3)",
        )
        .bind(check.id.into_inner())
        .bind(&check.client_name)
        .bind(check.timestamp)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// List status checks, oldest first, at most `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self, limit: i64) -> Result<Vec<StatusCheck>, DbError> {
        let rows = sqlx::query_as::<_, StatusRow>(
            r"SELECT id, client_name, timestamp
              FROM status_checks
              ORDER BY timestamp ASC
              LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(StatusCheck::from).collect())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct StatusRow {
    id: Uuid,
    client_name: String,
    timestamp: DateTime<Utc>,
}

impl From<StatusRow> for StatusCheck {
    fn from(row: StatusRow) -> Self {
        Self {
            id: StatusCheckId::from(row.id),
            client_name: row.client_name,
            timestamp: row.timestamp,
        }
    }
}
