//! Server-side session table for opaque bearer tokens.
//!
//! A token is a random UUID v4 in simple form. It maps to the email of the
//! user it was issued for and an expiry. Expired entries are dropped when
//! they are looked up, and [`SessionStore::purge_expired`] sweeps the rest.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Session {
    email: String,
    expires_at: DateTime<Utc>,
}

/// In-memory bearer-token sessions with a fixed lifetime.
#[derive(Debug)]
pub struct SessionStore {
    ttl: chrono::Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Create an empty table whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh token for `email`.
    pub async fn issue(&self, email: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.sessions.write().await.insert(
            token.clone(),
            Session {
                email: email.to_owned(),
                expires_at,
            },
        );
        token
    }

    /// The email a live token was issued for. Expired tokens are evicted.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.resolve_at(token, Utc::now()).await
    }

    async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        let session = self.sessions.read().await.get(token).cloned()?;
        if session.expires_at > now {
            return Some(session.email);
        }
        self.sessions.write().await.remove(token);
        tracing::debug!("evicted expired session");
        None
    }

    /// Drop every expired session; returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before.saturating_sub(sessions.len())
    }

    /// Number of stored sessions, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the table is empty.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
