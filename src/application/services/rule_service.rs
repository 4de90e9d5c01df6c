//! Redirect rule lifecycle: creation, owner-scoped reads, update, delete.

use std::sync::Arc;

use crate::application::policy;
use crate::domain::entities::{NewRule, Principal, RedirectRule, RulePatch};
use crate::domain::repositories::RuleRepository;
use crate::error::AppError;
use crate::utils::identifier::generate_identifier;
use crate::utils::redirect_url::validate_redirect_url;
use serde_json::json;
use uuid::Uuid;

/// Upper bound on identifier generation attempts per create.
///
/// At 48 bits of identifier entropy, hitting this bound means the random
/// source or the store is broken, not that the space is exhausted.
const MAX_IDENTIFIER_ATTEMPTS: usize = 10;

/// Service managing the redirect rule lifecycle.
///
/// Every mutation goes through validation and the ownership policy before
/// touching the store. Identifier uniqueness is enforced by the store's
/// unique constraint; this service owns the regenerate-and-retry loop around
/// it.
pub struct RuleService {
    rule_repository: Arc<dyn RuleRepository>,
}

impl RuleService {
    /// Creates a new rule service.
    pub fn new(rule_repository: Arc<dyn RuleRepository>) -> Self {
        Self { rule_repository }
    }

    /// Creates a redirect rule owned by `principal`.
    ///
    /// Generates a fresh 8-character identifier and retries with a new one if
    /// the store reports a uniqueness conflict, up to
    /// [`MAX_IDENTIFIER_ATTEMPTS`] times. Exhaustion is logged and surfaced
    /// as a generic internal error; identifier detail is never exposed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] referencing the `redirect_url` field
    /// if the destination is not a well-formed HTTP(S) URL.
    /// Returns [`AppError::Internal`] on retry exhaustion or database errors.
    pub async fn create_rule(
        &self,
        principal: &Principal,
        redirect_url: String,
        is_private: bool,
    ) -> Result<RedirectRule, AppError> {
        validate_redirect_url(&redirect_url).map_err(|e| {
            AppError::bad_request(
                "Invalid URL format",
                json!({ "field": "redirect_url", "reason": e.to_string() }),
            )
        })?;

        for attempt in 1..=MAX_IDENTIFIER_ATTEMPTS {
            let new_rule = NewRule {
                owner_id: principal.user_id,
                redirect_url: redirect_url.clone(),
                is_private,
                identifier: generate_identifier(),
            };

            match self.rule_repository.create(new_rule).await {
                Ok(rule) => return Ok(rule),
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(attempt, "Redirect identifier collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            attempts = MAX_IDENTIFIER_ATTEMPTS,
            "Exhausted redirect identifier generation attempts"
        );
        Err(AppError::internal(
            "Failed to allocate a unique redirect identifier",
            json!({}),
        ))
    }

    /// Retrieves a rule by id for its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the rule does not exist.
    /// Returns [`AppError::Forbidden`] if `principal` is not the owner.
    pub async fn get_rule(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<RedirectRule, AppError> {
        let rule = self.fetch(id).await?;
        self.require_owner(&rule, principal)?;
        Ok(rule)
    }

    /// Lists the caller's own rules, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_rules(&self, principal: &Principal) -> Result<Vec<RedirectRule>, AppError> {
        self.rule_repository.list_by_owner(principal.user_id).await
    }

    /// Applies a partial update to a rule.
    ///
    /// Only supplied fields change; `modified` advances, `created`,
    /// `identifier`, and `owner` never change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the rule does not exist.
    /// Returns [`AppError::Forbidden`] if `principal` is not the owner.
    /// Returns [`AppError::Validation`] if a supplied destination is invalid.
    pub async fn update_rule(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: RulePatch,
    ) -> Result<RedirectRule, AppError> {
        let rule = self.fetch(id).await?;
        self.require_owner(&rule, principal)?;

        if let Some(url) = &patch.redirect_url {
            validate_redirect_url(url).map_err(|e| {
                AppError::bad_request(
                    "Invalid URL format",
                    json!({ "field": "redirect_url", "reason": e.to_string() }),
                )
            })?;
        }

        if patch.is_empty() {
            return Ok(rule);
        }

        self.rule_repository.update(id, patch).await
    }

    /// Deletes a rule.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the rule does not exist.
    /// Returns [`AppError::Forbidden`] if `principal` is not the owner.
    pub async fn delete_rule(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        let rule = self.fetch(id).await?;
        self.require_owner(&rule, principal)?;

        let deleted = self.rule_repository.delete(id).await?;
        if !deleted {
            // Lost a race with a concurrent delete.
            return Err(AppError::not_found(
                "Redirect rule not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<RedirectRule, AppError> {
        self.rule_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Redirect rule not found", json!({ "id": id })))
    }

    fn require_owner(&self, rule: &RedirectRule, principal: &Principal) -> Result<(), AppError> {
        if !policy::can_mutate(rule, Some(principal)) {
            return Err(AppError::forbidden(
                "You do not have permission to modify this redirect rule",
                json!({}),
            ));
        }
        Ok(())
    }
}
