//! User persistence in `PostgreSQL`.

use agribot_types::UserId;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::records::UserRecord;

/// Operations on the `users` table.
pub struct UserStore<'a> {
    pool: &'a PgPool,
}

impl<'a> UserStore<'a> {
    /// Create a new user store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::DuplicateEmail`] if the email is already
    /// registered, or [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, user: &UserRecord) -> Result<(), DbError> {
        let inserted: Option<(Uuid,)> = sqlx::query_as(
            r"INSERT INTO users (id, name, email, password_hash, created_at, is_active)
              VALUES ($1, $2, $3, $4, $5, $6)
              ON CONFLICT (email) DO NOTHING
              RETURNING id",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.is_active)
        .fetch_optional(self.pool)
        .await?;

        if inserted.is_none() {
            return Err(DbError::DuplicateEmail(user.email.clone()));
        }
        tracing::info!(user_id = %user.id, "Inserted user");
        Ok(())
    }

    /// Look up a user by (already normalized) email.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"SELECT id, name, email, password_hash, created_at, is_active
              FROM users
              WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"SELECT id, name, email, password_hash, created_at, is_active
              FROM users
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }
}

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    is_active: bool,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from(row.id),
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            is_active: row.is_active,
        }
    }
}
