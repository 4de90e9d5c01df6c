//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_rule_handler, create_user_handler, delete_rule_handler, delete_user_handler,
    get_rule_handler, list_rules_handler, patch_rule_handler, replace_rule_handler,
    update_user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /rules`        - List the caller's redirect rules
/// - `POST   /rules`        - Create a redirect rule
/// - `GET    /rules/{id}`   - Fetch a rule (owner only)
/// - `PUT    /rules/{id}`   - Replace a rule's mutable fields (owner only)
/// - `PATCH  /rules/{id}`   - Partially update a rule (owner only)
/// - `DELETE /rules/{id}`   - Delete a rule (owner only)
/// - `POST   /users`        - Create a user (admin only)
/// - `PUT    /users/{id}`   - Update a user (admin only)
/// - `PATCH  /users/{id}`   - Partially update a user (admin only)
/// - `DELETE /users/{id}`   - Delete a user (admin only)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/rules", get(list_rules_handler).post(create_rule_handler))
        .route(
            "/rules/{id}",
            get(get_rule_handler)
                .put(replace_rule_handler)
                .patch(patch_rule_handler)
                .delete(delete_rule_handler),
        )
        .route("/users", post(create_user_handler))
        .route(
            "/users/{id}",
            put(update_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
}
