//! PostgreSQL implementation of the rule repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewRule, RedirectRule, RulePatch};
use crate::domain::repositories::RuleRepository;
use crate::error::AppError;

const RULE_COLUMNS: &str = "id, owner_id, redirect_url, is_private, identifier, created, modified";

/// PostgreSQL repository for redirect rules.
///
/// Identifier uniqueness is enforced by the `redirect_rules_identifier_key`
/// unique constraint, which makes concurrent creates with the same identifier
/// serializable at the storage layer: one wins, the other surfaces as
/// [`AppError::Conflict`] and is retried by the service with a fresh
/// identifier.
pub struct PgRuleRepository {
    pool: Arc<PgPool>,
}

impl PgRuleRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RuleRepository for PgRuleRepository {
    async fn create(&self, new_rule: NewRule) -> Result<RedirectRule, AppError> {
        let sql = format!(
            "INSERT INTO redirect_rules (owner_id, redirect_url, is_private, identifier) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {RULE_COLUMNS}"
        );

        let rule = sqlx::query_as::<_, RedirectRule>(&sql)
            .bind(new_rule.owner_id)
            .bind(&new_rule.redirect_url)
            .bind(new_rule.is_private)
            .bind(&new_rule.identifier)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(rule)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RedirectRule>, AppError> {
        let sql = format!("SELECT {RULE_COLUMNS} FROM redirect_rules WHERE id = $1");

        let rule = sqlx::query_as::<_, RedirectRule>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(rule)
    }

    async fn find_public_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<RedirectRule>, AppError> {
        let sql = format!(
            "SELECT {RULE_COLUMNS} FROM redirect_rules \
             WHERE identifier = $1 AND is_private = FALSE"
        );

        let rule = sqlx::query_as::<_, RedirectRule>(&sql)
            .bind(identifier)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(rule)
    }

    async fn find_private_by_identifier(
        &self,
        identifier: &str,
        owner_id: i64,
    ) -> Result<Option<RedirectRule>, AppError> {
        let sql = format!(
            "SELECT {RULE_COLUMNS} FROM redirect_rules \
             WHERE identifier = $1 AND is_private = TRUE AND owner_id = $2"
        );

        let rule = sqlx::query_as::<_, RedirectRule>(&sql)
            .bind(identifier)
            .bind(owner_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(rule)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<RedirectRule>, AppError> {
        let sql = format!(
            "SELECT {RULE_COLUMNS} FROM redirect_rules \
             WHERE owner_id = $1 \
             ORDER BY created DESC, id DESC"
        );

        let rules = sqlx::query_as::<_, RedirectRule>(&sql)
            .bind(owner_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rules)
    }

    async fn update(&self, id: Uuid, patch: RulePatch) -> Result<RedirectRule, AppError> {
        let sql = format!(
            "UPDATE redirect_rules \
             SET redirect_url = COALESCE($2, redirect_url), \
                 is_private = COALESCE($3, is_private), \
                 modified = NOW() \
             WHERE id = $1 \
             RETURNING {RULE_COLUMNS}"
        );

        let rule = sqlx::query_as::<_, RedirectRule>(&sql)
            .bind(id)
            .bind(patch.redirect_url)
            .bind(patch.is_private)
            .fetch_optional(self.pool.as_ref())
            .await?;

        rule.ok_or_else(|| AppError::not_found("Redirect rule not found", json!({ "id": id })))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM redirect_rules WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
