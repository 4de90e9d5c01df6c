//! DTOs for user management endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `PUT`/`PATCH /api/users/{id}`.
///
/// All fields are optional — only provided fields are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

/// JSON representation of a user account.
///
/// The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}
