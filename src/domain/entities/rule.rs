//! Redirect rule entity: the mapping between a public identifier and a
//! destination URL, owned by a single user.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A redirect rule.
///
/// `identifier` is the short public lookup key embedded in shareable links;
/// `id` is the internal identity token used by the management API. Both are
/// assigned at creation and never reassigned, as is `owner_id`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RedirectRule {
    pub id: Uuid,
    pub owner_id: i64,
    pub redirect_url: String,
    pub is_private: bool,
    pub identifier: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl RedirectRule {
    /// Creates a new RedirectRule instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        owner_id: i64,
        redirect_url: String,
        is_private: bool,
        identifier: String,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            redirect_url,
            is_private,
            identifier,
            created,
            modified,
        }
    }

    /// Returns true if the rule is visible on the public resolution path.
    pub fn is_public(&self) -> bool {
        !self.is_private
    }
}

/// Input data for creating a new rule.
///
/// The identifier is pre-generated by the caller; the store enforces its
/// uniqueness and the caller retries with a fresh one on conflict.
#[derive(Debug, Clone)]
pub struct NewRule {
    pub owner_id: i64,
    pub redirect_url: String,
    pub is_private: bool,
    pub identifier: String,
}

/// Partial update for an existing rule.
///
/// `None` fields are left unchanged. Only the destination and visibility are
/// mutable; identifier and owner are fixed for the lifetime of the rule.
#[derive(Debug, Clone, Default)]
pub struct RulePatch {
    pub redirect_url: Option<String>,
    pub is_private: Option<bool>,
}

impl RulePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.redirect_url.is_none() && self.is_private.is_none()
    }
}
