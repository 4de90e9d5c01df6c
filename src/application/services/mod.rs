//! Business logic services for the application layer.

pub mod auth_service;
pub mod resolve_service;
pub mod rule_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use resolve_service::ResolveService;
pub use rule_service::RuleService;
pub use user_service::{UserService, UserUpdate, hash_password};
