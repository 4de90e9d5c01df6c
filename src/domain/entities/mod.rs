//! Core business entities.

mod principal;
mod rule;
mod user;

pub use principal::Principal;
pub use rule::{NewRule, RedirectRule, RulePatch};
pub use user::{NewUser, User, UserPatch};
