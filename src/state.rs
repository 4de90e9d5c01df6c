//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, ResolveService, RuleService, UserService};

/// Application-wide state: the service layer plus the raw pool for health
/// probes.
///
/// Cheap to clone; all services are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub rule_service: Arc<RuleService>,
    pub resolve_service: Arc<ResolveService>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Creates application state from assembled services.
    pub fn new(
        db: PgPool,
        rule_service: Arc<RuleService>,
        resolve_service: Arc<ResolveService>,
        auth_service: Arc<AuthService>,
        user_service: Arc<UserService>,
    ) -> Self {
        Self {
            db,
            rule_service,
            resolve_service,
            auth_service,
            user_service,
        }
    }
}
