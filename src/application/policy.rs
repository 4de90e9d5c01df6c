//! Pure authorization decisions for redirect rules.
//!
//! Visibility and ownership are orthogonal: `is_private` gates which
//! resolution path may return a rule, ownership gates mutation. These
//! functions have no I/O and no transport dependencies; the HTTP layer and
//! the store both defer to them.
//!
//! The resolution paths additionally scope their store lookups (see
//! [`crate::domain::repositories::RuleRepository`]) so an unauthorized caller
//! receives the same not-found signal whether the identifier does not exist
//! or belongs to someone else.

use crate::domain::entities::{Principal, RedirectRule};

/// A public resolution may return the rule iff it is not private.
///
/// The requesting principal is irrelevant here; public rules redirect anyone,
/// including anonymous callers.
pub fn can_resolve_public(rule: &RedirectRule) -> bool {
    !rule.is_private
}

/// A private resolution may return the rule iff a principal is present, the
/// rule is private, and the principal is its owner.
///
/// A public rule is never served on the private path; the two paths partition
/// the rule space by visibility.
pub fn can_resolve_private(rule: &RedirectRule, principal: Option<&Principal>) -> bool {
    match principal {
        Some(p) => rule.is_private && p.owns(rule.owner_id),
        None => false,
    }
}

/// A rule may be read in detail, mutated, or deleted iff a principal is
/// present and owns it.
///
/// `is_admin` deliberately plays no part here; admins manage users, not other
/// people's rules.
pub fn can_mutate(rule: &RedirectRule, principal: Option<&Principal>) -> bool {
    principal.is_some_and(|p| p.owns(rule.owner_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn rule(owner_id: i64, is_private: bool) -> RedirectRule {
        let now = Utc::now();
        RedirectRule::new(
            Uuid::new_v4(),
            owner_id,
            "https://example.com".to_string(),
            is_private,
            "ident123".to_string(),
            now,
            now,
        )
    }

    fn principal(user_id: i64) -> Principal {
        Principal {
            user_id,
            username: format!("user{user_id}"),
            is_admin: false,
        }
    }

    fn admin(user_id: i64) -> Principal {
        Principal {
            is_admin: true,
            ..principal(user_id)
        }
    }

    #[test]
    fn test_public_resolution_allows_public_rules_only() {
        assert!(can_resolve_public(&rule(1, false)));
        assert!(!can_resolve_public(&rule(1, true)));
    }

    #[test]
    fn test_private_resolution_requires_principal() {
        assert!(!can_resolve_private(&rule(1, true), None));
    }

    #[test]
    fn test_private_resolution_requires_ownership() {
        let r = rule(1, true);
        assert!(can_resolve_private(&r, Some(&principal(1))));
        assert!(!can_resolve_private(&r, Some(&principal(2))));
    }

    #[test]
    fn test_private_resolution_never_serves_public_rules() {
        let r = rule(1, false);
        assert!(!can_resolve_private(&r, Some(&principal(1))));
    }

    #[test]
    fn test_mutation_requires_owner() {
        let r = rule(1, false);
        assert!(can_mutate(&r, Some(&principal(1))));
        assert!(!can_mutate(&r, Some(&principal(2))));
        assert!(!can_mutate(&r, None));
    }

    #[test]
    fn test_admin_flag_does_not_grant_rule_access() {
        let r = rule(1, true);
        assert!(!can_resolve_private(&r, Some(&admin(2))));
        assert!(!can_mutate(&r, Some(&admin(2))));
    }

    #[test]
    fn test_visibility_and_ownership_are_orthogonal() {
        // Owner can mutate regardless of visibility.
        assert!(can_mutate(&rule(1, true), Some(&principal(1))));
        assert!(can_mutate(&rule(1, false), Some(&principal(1))));

        // But resolution paths partition by visibility even for the owner.
        assert!(!can_resolve_public(&rule(1, true)));
        assert!(!can_resolve_private(&rule(1, false), Some(&principal(1))));
    }
}
