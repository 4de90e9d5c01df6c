//! Redirect resolution: the public and private entry points.

use std::sync::Arc;

use crate::application::policy;
use crate::domain::entities::Principal;
use crate::domain::repositories::RuleRepository;
use crate::error::AppError;
use serde_json::json;

/// Service resolving redirect identifiers to destination URLs.
///
/// Stateless aside from the store it consults. Both entry points use lookups
/// that are scoped by visibility (and ownership, on the private path) at the
/// query level, then confirm the result against the pure policy. Every
/// non-success outcome collapses into the same not-found failure so callers
/// cannot distinguish "does not exist" from "exists but hidden".
pub struct ResolveService {
    rule_repository: Arc<dyn RuleRepository>,
}

impl ResolveService {
    /// Creates a new resolve service.
    pub fn new(rule_repository: Arc<dyn RuleRepository>) -> Self {
        Self { rule_repository }
    }

    /// Resolves a public identifier to its destination URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no public rule carries this
    /// identifier — including when a private rule does.
    pub async fn resolve_public(&self, identifier: &str) -> Result<String, AppError> {
        self.rule_repository
            .find_public_by_identifier(identifier)
            .await?
            .filter(policy::can_resolve_public)
            .map(|rule| rule.redirect_url)
            .ok_or_else(|| Self::uniform_not_found(identifier))
    }

    /// Resolves a private identifier to its destination URL for its owner.
    ///
    /// Authentication is the transport layer's job; by the time this runs a
    /// principal is present. Wrong owner, public rule, and nonexistent
    /// identifier all yield the identical not-found failure.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no private rule with this identifier
    /// is owned by `principal`.
    pub async fn resolve_private(
        &self,
        identifier: &str,
        principal: &Principal,
    ) -> Result<String, AppError> {
        self.rule_repository
            .find_private_by_identifier(identifier, principal.user_id)
            .await?
            .filter(|rule| policy::can_resolve_private(rule, Some(principal)))
            .map(|rule| rule.redirect_url)
            .ok_or_else(|| Self::uniform_not_found(identifier))
    }

    fn uniform_not_found(identifier: &str) -> AppError {
        AppError::not_found(
            "Redirect not found",
            json!({ "identifier": identifier }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RedirectRule;
    use crate::domain::repositories::MockRuleRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn rule(owner_id: i64, is_private: bool, url: &str) -> RedirectRule {
        let now = Utc::now();
        RedirectRule::new(
            Uuid::new_v4(),
            owner_id,
            url.to_string(),
            is_private,
            "ident123".to_string(),
            now,
            now,
        )
    }

    fn principal(user_id: i64) -> Principal {
        Principal {
            user_id,
            username: format!("user{user_id}"),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_resolve_public_returns_destination() {
        let mut mock_repo = MockRuleRepository::new();
        let public = rule(1, false, "https://example.com/public");

        mock_repo
            .expect_find_public_by_identifier()
            .withf(|identifier| identifier == "ident123")
            .times(1)
            .returning(move |_| Ok(Some(public.clone())));

        let service = ResolveService::new(Arc::new(mock_repo));

        let url = service.resolve_public("ident123").await.unwrap();
        assert_eq!(url, "https://example.com/public");
    }

    #[tokio::test]
    async fn test_resolve_public_unknown_identifier_is_not_found() {
        let mut mock_repo = MockRuleRepository::new();
        mock_repo
            .expect_find_public_by_identifier()
            .times(1)
            .returning(|_| Ok(None));

        let service = ResolveService::new(Arc::new(mock_repo));

        let result = service.resolve_public("missing1").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_private_for_owner() {
        let mut mock_repo = MockRuleRepository::new();
        let private = rule(7, true, "https://example.com/private");

        mock_repo
            .expect_find_private_by_identifier()
            .withf(|identifier, owner_id| identifier == "ident123" && *owner_id == 7)
            .times(1)
            .returning(move |_, _| Ok(Some(private.clone())));

        let service = ResolveService::new(Arc::new(mock_repo));

        let url = service
            .resolve_private("ident123", &principal(7))
            .await
            .unwrap();
        assert_eq!(url, "https://example.com/private");
    }

    #[tokio::test]
    async fn test_resolve_private_scopes_lookup_to_principal() {
        let mut mock_repo = MockRuleRepository::new();

        // The store lookup is scoped to the caller, so another owner's rule
        // never comes back in the first place.
        mock_repo
            .expect_find_private_by_identifier()
            .withf(|_, owner_id| *owner_id == 9)
            .times(1)
            .returning(|_, _| Ok(None));

        let service = ResolveService::new(Arc::new(mock_repo));

        let result = service.resolve_private("ident123", &principal(9)).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_not_found_signal_is_uniform() {
        let mut mock_repo = MockRuleRepository::new();
        mock_repo
            .expect_find_public_by_identifier()
            .times(2)
            .returning(|_| Ok(None));

        let service = ResolveService::new(Arc::new(mock_repo));

        // Nonexistent identifier and an identifier held by a private rule
        // produce byte-identical failures on the public path.
        let missing = service.resolve_public("missing1").await.unwrap_err();
        let hidden = service.resolve_public("hidden12").await.unwrap_err();

        assert_eq!(missing.to_string(), hidden.to_string());
    }
}
