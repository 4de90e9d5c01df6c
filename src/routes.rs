//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /public/{identifier}`  - Public redirect (anonymous)
//! - `GET /private/{identifier}` - Private redirect (Bearer token, owner only)
//! - `GET /health`               - Health check: database probe (public)
//! - `/api/*`                    - Rule and user management (Bearer token)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on `/private/*` and `/api/*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, private_redirect_handler, public_redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application routes with authentication and tracing applied.
pub fn base_router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let private_redirect = Router::new()
        .route("/private/{identifier}", get(private_redirect_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/public/{identifier}", get(public_redirect_handler))
        .route("/health", get(health_handler))
        .merge(private_redirect)
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the full application router, with trailing-slash normalization
/// wrapped around [`base_router`].
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(base_router(state))
}
