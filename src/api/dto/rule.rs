//! DTOs for redirect rule management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::RedirectRule;

/// Request body for `POST /api/rules`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRuleRequest {
    /// Destination URL for this rule (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub redirect_url: String,

    /// Visibility flag; private rules resolve only for their owner.
    #[serde(default)]
    pub is_private: bool,
}

/// Request body for `PUT /api/rules/{id}` — full replacement of the mutable
/// fields.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceRuleRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub redirect_url: String,

    pub is_private: bool,
}

/// Request body for `PATCH /api/rules/{id}`.
///
/// All fields are optional — only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchRuleRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub redirect_url: Option<String>,

    pub is_private: Option<bool>,
}

/// JSON representation of a redirect rule.
///
/// The owner is deliberately absent: rule bodies never disclose whose they
/// are.
#[derive(Debug, Serialize)]
pub struct RuleResponse {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub redirect_url: String,
    pub is_private: bool,
    pub redirect_identifier: String,
}

impl From<RedirectRule> for RuleResponse {
    fn from(rule: RedirectRule) -> Self {
        Self {
            id: rule.id,
            created: rule.created,
            modified: rule.modified,
            redirect_url: rule.redirect_url,
            is_private: rule.is_private,
            redirect_identifier: rule.identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_response_never_serializes_owner() {
        let now = Utc::now();
        let rule = RedirectRule::new(
            Uuid::new_v4(),
            42,
            "https://example.com".to_string(),
            true,
            "ident123".to_string(),
            now,
            now,
        );

        let body = serde_json::to_value(RuleResponse::from(rule)).unwrap();

        assert!(body.get("owner").is_none());
        assert!(body.get("owner_id").is_none());
        assert_eq!(body["redirect_identifier"], "ident123");
        assert_eq!(body["is_private"], true);
    }

    #[test]
    fn test_create_request_defaults_to_public() {
        let request: CreateRuleRequest =
            serde_json::from_str(r#"{"redirect_url": "https://example.com"}"#).unwrap();
        assert!(!request.is_private);
    }

    #[test]
    fn test_patch_request_accepts_partial_body() {
        let request: PatchRuleRequest = serde_json::from_str(r#"{"is_private": true}"#).unwrap();
        assert!(request.redirect_url.is_none());
        assert_eq!(request.is_private, Some(true));
    }
}
