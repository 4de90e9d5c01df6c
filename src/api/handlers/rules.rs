//! Handlers for redirect rule management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::rule::{
    CreateRuleRequest, PatchRuleRequest, ReplaceRuleRequest, RuleResponse,
};
use crate::domain::entities::{Principal, RulePatch};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a redirect rule owned by the caller.
///
/// # Endpoint
///
/// `POST /api/rules`
///
/// # Request Body
///
/// ```json
/// {
///   "redirect_url": "https://example.com/target",
///   "is_private": false
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the destination URL is malformed; nothing is
/// persisted in that case.
pub async fn create_rule_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<RuleResponse>), AppError> {
    payload.validate()?;

    let rule = state
        .rule_service
        .create_rule(&principal, payload.redirect_url, payload.is_private)
        .await?;

    Ok((StatusCode::CREATED, Json(rule.into())))
}

/// Lists the caller's own rules, newest-created first.
///
/// # Endpoint
///
/// `GET /api/rules`
pub async fn list_rules_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<RuleResponse>>, AppError> {
    let rules = state.rule_service.list_rules(&principal).await?;
    Ok(Json(rules.into_iter().map(RuleResponse::from).collect()))
}

/// Returns a single rule owned by the caller.
///
/// # Endpoint
///
/// `GET /api/rules/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the rule doesn't exist, 403 Forbidden if the
/// caller is not the owner.
pub async fn get_rule_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<RuleResponse>, AppError> {
    let rule = state.rule_service.get_rule(&principal, id).await?;
    Ok(Json(rule.into()))
}

/// Fully replaces the mutable fields of a rule.
///
/// # Endpoint
///
/// `PUT /api/rules/{id}`
///
/// Identifier, owner, and `created` are immutable; `modified` advances.
///
/// # Errors
///
/// Returns 400 Bad Request on a malformed URL, 403 Forbidden if the caller is
/// not the owner, 404 Not Found if the rule doesn't exist.
pub async fn replace_rule_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<ReplaceRuleRequest>,
) -> Result<Json<RuleResponse>, AppError> {
    payload.validate()?;

    let patch = RulePatch {
        redirect_url: Some(payload.redirect_url),
        is_private: Some(payload.is_private),
    };

    let rule = state.rule_service.update_rule(&principal, id, patch).await?;
    Ok(Json(rule.into()))
}

/// Partially updates a rule.
///
/// # Endpoint
///
/// `PATCH /api/rules/{id}`
///
/// Only provided fields are changed.
///
/// # Errors
///
/// Same as [`replace_rule_handler`].
pub async fn patch_rule_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<PatchRuleRequest>,
) -> Result<Json<RuleResponse>, AppError> {
    payload.validate()?;

    let patch = RulePatch {
        redirect_url: payload.redirect_url,
        is_private: payload.is_private,
    };

    let rule = state.rule_service.update_rule(&principal, id, patch).await?;
    Ok(Json(rule.into()))
}

/// Deletes a rule.
///
/// # Endpoint
///
/// `DELETE /api/rules/{id}`
///
/// # Errors
///
/// Returns 403 Forbidden if the caller is not the owner, 404 Not Found if the
/// rule doesn't exist.
pub async fn delete_rule_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<StatusCode, AppError> {
    state.rule_service.delete_rule(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
