//! In-process store for development and tests.
//!
//! Holds users keyed by lowercased email and status checks in insertion
//! order. Contents are lost on restart.

use std::collections::HashMap;

use agribot_types::{StatusCheck, UserId};
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::records::UserRecord;

/// In-memory user and status-check tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
    status_checks: RwLock<Vec<StatusCheck>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn insert_user(&self, user: UserRecord) -> Result<(), DbError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(DbError::DuplicateEmail(user.email));
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    pub(crate) async fn find_user_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.read().await.get(email).cloned()
    }

    pub(crate) async fn find_user_by_id(&self, id: UserId) -> Option<UserRecord> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned()
    }

    pub(crate) async fn insert_status_check(&self, check: StatusCheck) {
        self.status_checks.write().await.push(check);
    }

    pub(crate) async fn list_status_checks(&self, limit: usize) -> Vec<StatusCheck> {
        self.status_checks
            .read()
            .await
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }
}
