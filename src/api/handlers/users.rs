//! Handlers for administrative user management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::application::services::UserUpdate;
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a user account.
///
/// # Endpoint
///
/// `POST /api/users` — admin only.
///
/// # Errors
///
/// Returns 403 Forbidden for non-admin callers, 400 Bad Request on invalid
/// username/password, 409 Conflict on a taken username.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .user_service
        .create_user(&principal, payload.username, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Fully or partially updates a user account.
///
/// # Endpoint
///
/// `PUT`/`PATCH /api/users/{id}` — admin only. Both verbs accept the same
/// body; absent fields are left unchanged.
///
/// # Errors
///
/// Returns 403 Forbidden for non-admin callers, 404 Not Found if the user
/// doesn't exist.
pub async fn update_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let update = UserUpdate {
        username: payload.username,
        password: payload.password,
        is_active: payload.is_active,
    };

    let user = state.user_service.update_user(&principal, id, update).await?;
    Ok(Json(user.into()))
}

/// Deletes a user account.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}` — admin only.
///
/// # Errors
///
/// Returns 403 Forbidden for non-admin callers, 404 Not Found if the user
/// doesn't exist.
pub async fn delete_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
