//! Handlers for the public and private redirect entry points.

use axum::{
    Extension,
    extract::{Path, State},
    response::Redirect,
};

use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a public redirect identifier.
///
/// # Endpoint
///
/// `GET /public/{identifier}` — no authentication.
///
/// # Errors
///
/// Returns 404 Not Found if no public rule carries this identifier. A private
/// rule with the same identifier produces the identical 404 so the response
/// never reveals that the identifier is taken.
pub async fn public_redirect_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state.resolve_service.resolve_public(&identifier).await?;
    Ok(Redirect::temporary(&url))
}

/// Resolves a private redirect identifier for its owner.
///
/// # Endpoint
///
/// `GET /private/{identifier}` — Bearer token required.
///
/// The auth middleware rejects anonymous requests with 401 before this
/// handler runs and attaches the authenticated [`Principal`].
///
/// # Errors
///
/// Returns 404 Not Found if no private rule with this identifier is owned by
/// the caller — wrong owner, public rule, and nonexistent identifier are
/// indistinguishable.
pub async fn private_redirect_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Redirect, AppError> {
    let url = state
        .resolve_service
        .resolve_private(&identifier, &principal)
        .await?;
    Ok(Redirect::temporary(&url))
}
