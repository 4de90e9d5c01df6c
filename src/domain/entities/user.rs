//! User account entity.

use chrono::{DateTime, Utc};

/// A registered user account.
///
/// Passwords are stored as keyed HMAC-SHA256 hashes, never in plain text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Partial update for an existing user.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "ab".repeat(32),
            is_admin: false,
            is_active: true,
            created_at: Utc::now(),
        };

        assert_eq!(user.username, "alice");
        assert!(user.is_active);
        assert!(!user.is_admin);
    }
}
