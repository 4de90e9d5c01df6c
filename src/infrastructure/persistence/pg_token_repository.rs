//! PostgreSQL implementation of the token repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Principal;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;

const TOKEN_COLUMNS: &str = "id, user_id, name, token_hash, created_at, last_used_at, revoked_at";

#[derive(sqlx::FromRow)]
struct PrincipalRow {
    user_id: i64,
    username: String,
    is_admin: bool,
}

/// PostgreSQL repository for API tokens.
///
/// Token resolution joins the owning user so revoked tokens and deactivated
/// accounts are rejected in a single query.
pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn find_principal_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Principal>, AppError> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            "SELECT u.id AS user_id, u.username, u.is_admin \
             FROM api_tokens t \
             JOIN users u ON u.id = t.user_id \
             WHERE t.token_hash = $1 AND t.revoked_at IS NULL AND u.is_active",
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| Principal {
            user_id: r.user_id,
            username: r.username,
            is_admin: r.is_admin,
        }))
    }

    async fn touch_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE api_tokens SET last_used_at = NOW() WHERE token_hash = $1")
            .bind(token_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let sql = format!(
            "INSERT INTO api_tokens (user_id, name, token_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {TOKEN_COLUMNS}"
        );

        let token = sqlx::query_as::<_, ApiToken>(&sql)
            .bind(user_id)
            .bind(name)
            .bind(token_hash)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let sql = format!("SELECT {TOKEN_COLUMNS} FROM api_tokens ORDER BY created_at DESC");

        let tokens = sqlx::query_as::<_, ApiToken>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(tokens)
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE api_tokens SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Token not found", json!({ "id": id })));
        }

        Ok(())
    }
}
