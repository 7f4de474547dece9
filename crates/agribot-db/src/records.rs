//! Stored record shapes shared by every backend.

use agribot_types::{User, UserId};
use chrono::{DateTime, Utc};

/// A user as persisted, including the password hash.
///
/// Only [`UserRecord::to_user`] crosses into the API layer, so the hash
/// never leaves the store and the auth module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Lowercased login email.
    pub email: String,
    /// `bcrypt` hash of the password.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Inactive accounts cannot authenticate.
    pub is_active: bool,
}

impl UserRecord {
    /// Build a fresh, active record with a new ID and the current time.
    ///
    /// The email is trimmed and lowercased.
    pub fn new(name: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            name: name.trim().to_owned(),
            email: normalize_email(email),
            password_hash,
            created_at: Utc::now(),
            is_active: true,
        }
    }

    /// The public view of this user.
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            is_active: self.is_active,
        }
    }
}

/// Canonical form of an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_normalizes_email_and_is_active() {
        let record = UserRecord::new(" Asha ", "  Asha@Example.COM ", "hash".to_owned());
        assert_eq!(record.email, "asha@example.com");
        assert_eq!(record.name, "Asha");
        assert!(record.is_active);
    }

    #[test]
    fn public_view_drops_hash() {
        let record = UserRecord::new("Ravi", "ravi@example.com", "secret-hash".to_owned());
        let user = record.to_user();
        assert_eq!(user.id, record.id);
        assert_eq!(user.email, record.email);
        let debug = format!("{user:?}");
        assert!(!debug.contains("secret-hash"));
    }
}
