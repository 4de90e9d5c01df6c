//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgRuleRepository`] - Redirect rule storage with identifier uniqueness
//! - [`PgUserRepository`] - User account storage
//! - [`PgTokenRepository`] - API token storage and principal resolution

pub mod pg_rule_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_rule_repository::PgRuleRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
