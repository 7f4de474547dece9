//! `PostgreSQL` backend for accounts and status checks.
//!
//! [`PostgresPool::open`] connects and brings the `users` and
//! `status_checks` tables up to date in one step, so a [`Store`] built on it
//! is immediately usable. Queries are built at runtime and always
//! parameterized.
//!
//! [`Store`]: crate::Store

use std::time::Duration;

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::error::DbError;

/// Account and status-check schema, embedded at build time.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// How long a request waits for a free connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Idle connections are recycled after this long.
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// A migrated connection pool.
#[derive(Clone)]
pub struct PostgresPool {
    pool: PgPool,
}

impl PostgresPool {
    /// Connect to `url` with at most `max_connections` connections and apply
    /// any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] for a malformed URL or a zero pool size,
    /// [`DbError::Postgres`] if the server is unreachable, or
    /// [`DbError::Migration`] if the schema cannot be applied.
    pub async fn open(url: &str, max_connections: u32) -> Result<Self, DbError> {
        if max_connections == 0 {
            return Err(DbError::Config(
                "database.max_connections must be at least 1".to_owned(),
            ));
        }
        let options: PgConnectOptions = url
            .parse()
            .map_err(|e: sqlx::Error| DbError::Config(format!("invalid database URL: {e}")))?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .idle_timeout(IDLE_TIMEOUT)
            .connect_with(options)
            .await?;
        MIGRATOR.run(&pool).await?;

        tracing::info!(
            max_connections,
            migrations = MIGRATOR.iter().count(),
            "account database ready"
        );
        Ok(Self { pool })
    }

    pub(crate) const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("account database closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_embedded() {
        let names: Vec<_> = MIGRATOR.iter().map(|m| m.description.to_string()).collect();
        assert_eq!(names, ["init"]);
    }

    #[tokio::test]
    async fn zero_pool_size_is_a_config_error() {
        let result = PostgresPool::open("postgresql://localhost/agribot", 0).await;
        assert!(matches!(result, Err(DbError::Config(_))));
    }

    #[tokio::test]
    async fn malformed_url_is_a_config_error() {
        let result = PostgresPool::open("not a url", 2).await;
        assert!(matches!(result, Err(DbError::Config(_))));
    }
}
