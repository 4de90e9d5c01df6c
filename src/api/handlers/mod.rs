//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod rules;
pub mod users;

pub use health::health_handler;
pub use redirect::{private_redirect_handler, public_redirect_handler};
pub use rules::{
    create_rule_handler, delete_rule_handler, get_rule_handler, list_rules_handler,
    patch_rule_handler, replace_rule_handler,
};
pub use users::{create_user_handler, delete_user_handler, update_user_handler};
