//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and authorization. Services consume repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Modules
//!
//! - [`policy`] - Pure authorization decisions for redirect rules
//! - [`services::rule_service::RuleService`] - Rule lifecycle management
//! - [`services::resolve_service::ResolveService`] - Public/private redirect resolution
//! - [`services::auth_service::AuthService`] - Bearer token authentication
//! - [`services::user_service::UserService`] - Admin-gated user management

pub mod policy;
pub mod services;
