//! Shared utilities: identifier generation and URL validation.

pub mod identifier;
pub mod redirect_url;
