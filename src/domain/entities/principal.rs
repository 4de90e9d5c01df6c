//! Authenticated request principal.

/// The authenticated identity attached to a request.
///
/// Produced by the authentication layer from a valid bearer token and an
/// active user account. Absence of a `Principal` means the request is
/// anonymous. Equality is by `user_id`; `is_admin` is consumed only by the
/// user-management surface, never by rule authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl Principal {
    /// Returns true if this principal owns the given rule owner id.
    pub fn owns(&self, owner_id: i64) -> bool {
        self.user_id == owner_id
    }
}
