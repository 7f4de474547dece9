//! Backend-agnostic persistence facade.
//!
//! [`Store`] dispatches to the in-memory tables or to `PostgreSQL`. Callers
//! hand in normalized data; [`Store::find_user_by_email`] normalizes the
//! lookup key itself so login is case-insensitive on every backend.

use agribot_types::{StatusCheck, UserId};

use crate::error::DbError;
use crate::memory::MemoryStore;
use crate::postgres::PostgresPool;
use crate::records::{UserRecord, normalize_email};
use crate::status_store::StatusStore;
use crate::user_store::UserStore;

/// Users and status checks, in memory or in `PostgreSQL`.
pub enum Store {
    /// Process-local tables.
    Memory(Box<MemoryStore>),
    /// `PostgreSQL` via a `sqlx` pool.
    Postgres(PostgresPool),
}

impl Store {
    /// An empty in-memory store.
    pub fn memory() -> Self {
        Self::Memory(Box::default())
    }

    /// Human-readable backend name for logging.
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }

    /// Persist a new user. The email is normalized before the uniqueness
    /// check.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::DuplicateEmail`] if the email is taken, or
    /// [`DbError::Postgres`] on a database failure.
    pub async fn insert_user(&self, mut user: UserRecord) -> Result<(), DbError> {
        user.email = normalize_email(&user.email);
        match self {
            Self::Memory(store) => store.insert_user(user).await,
            Self::Postgres(pool) => UserStore::new(pool.pool()).insert(&user).await,
        }
    }

    /// Look up a user by email, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] on a database failure.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, DbError> {
        let email = normalize_email(email);
        match self {
            Self::Memory(store) => Ok(store.find_user_by_email(&email).await),
            Self::Postgres(pool) => UserStore::new(pool.pool()).find_by_email(&email).await,
        }
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] on a database failure.
    pub async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, DbError> {
        match self {
            Self::Memory(store) => Ok(store.find_user_by_id(id).await),
            Self::Postgres(pool) => UserStore::new(pool.pool()).find_by_id(id).await,
        }
    }

    /// Record a status check.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] on a database failure.
    pub async fn insert_status_check(&self, check: StatusCheck) -> Result<(), DbError> {
        match self {
            Self::Memory(store) => {
                store.insert_status_check(check).await;
                Ok(())
            }
            Self::Postgres(pool) => StatusStore::new(pool.pool()).insert(&check).await,
        }
    }

    /// Up to `limit` status checks, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] on a database failure.
    pub async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, DbError> {
        match self {
            Self::Memory(store) => Ok(store.list_status_checks(limit).await),
            Self::Postgres(pool) => {
                let limit = i64::try_from(limit).unwrap_or(i64::MAX);
                StatusStore::new(pool.pool()).list(limit).await
            }
        }
    }

    /// Close the underlying pool, if any.
    pub async fn close(&self) {
        if let Self::Postgres(pool) = self {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use agribot_types::StatusCheckId;
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let store = Store::memory();
        let first = UserRecord::new("Asha", "asha@example.com", "h1".to_owned());
        assert!(store.insert_user(first).await.is_ok());

        let second = UserRecord::new("Asha Two", "ASHA@example.com", "h2".to_owned());
        let result = store.insert_user(second).await;
        assert!(matches!(result, Err(DbError::DuplicateEmail(email)) if email == "asha@example.com"));
    }

    #[tokio::test]
    async fn users_are_found_by_email_and_id() {
        let store = Store::memory();
        let record = UserRecord::new("Ravi", "ravi@example.com", "h".to_owned());
        let id = record.id;
        assert!(store.insert_user(record).await.is_ok());

        let by_email = store.find_user_by_email("  RAVI@example.com").await;
        assert_eq!(by_email.ok().flatten().map(|u| u.id), Some(id));

        let by_id = store.find_user_by_id(id).await;
        assert_eq!(by_id.ok().flatten().map(|u| u.name), Some("Ravi".to_owned()));

        let missing = store.find_user_by_id(UserId::new()).await;
        assert!(matches!(missing, Ok(None)));
    }

    #[tokio::test]
    async fn status_checks_list_in_insertion_order_with_limit() {
        let store = Store::memory();
        for name in ["a", "b", "c"] {
            let check = StatusCheck {
                id: StatusCheckId::new(),
                client_name: name.to_owned(),
                timestamp: Utc::now(),
            };
            assert!(store.insert_status_check(check).await.is_ok());
        }

        let all = store.list_status_checks(1000).await.unwrap_or_default();
        let names: Vec<&str> = all.iter().map(|c| c.client_name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);

        let limited = store.list_status_checks(2).await.unwrap_or_default();
        assert_eq!(limited.len(), 2);
        assert_eq!(store.backend_name(), "memory");
    }
}
