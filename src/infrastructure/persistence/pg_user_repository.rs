//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, username, password_hash, is_admin, is_active, created_at";

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (username, password_hash, is_admin) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.username)
            .bind(&new_user.password_hash)
            .bind(new_user.is_admin)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE users \
             SET username = COALESCE($2, username), \
                 password_hash = COALESCE($3, password_hash), \
                 is_active = COALESCE($4, is_active) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(patch.username)
            .bind(patch.password_hash)
            .bind(patch.is_active)
            .fetch_optional(self.pool.as_ref())
            .await?;

        user.ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
