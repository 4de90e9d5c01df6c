//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Hash it and resolve against stored token credentials
/// 3. Attach the resulting [`Principal`] to the request extensions
/// 4. Continue to the next middleware/handler
///
/// Handlers behind this layer read the caller with
/// `Extension<Principal>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing or malformed
/// - Token is unknown or revoked
/// - The owning user account has been deactivated
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// [`Principal`]: crate::domain::entities::Principal
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let principal = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
