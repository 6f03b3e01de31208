//! The ownership authorization policy.
//!
//! A single pure decision function governs read, update, and delete of any
//! owned resource (tasks, user records):
//!
//! | principal role | owner matches principal | decision |
//! |----------------|-------------------------|----------|
//! | Admin          | any                     | allow    |
//! | User           | yes                     | allow    |
//! | User           | no                      | deny     |
//!
//! Anonymous callers never reach the policy: the auth middleware rejects them
//! with 401 first. Listing is not decided here either; list queries are
//! scoped to the caller at the store boundary (see `store::TaskStore`), so a
//! non-admin can never materialize foreign rows, even transiently.

use crate::auth::principal::{Principal, Role};

/// The operation being authorized. The current rule table does not
/// distinguish between them, but callers state their intent and the policy
/// stays the single place to tighten if that ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Update,
    Delete,
}

/// Decides whether `principal` may perform `operation` on a resource owned by
/// `resource_owner_id`. Pure; no side effects.
pub fn can_access(principal: &Principal, resource_owner_id: i32, _operation: Operation) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::User => principal.user_id == resource_owner_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(user_id: i32, role: Role) -> Principal {
        Principal {
            user_id,
            email: format!("user{}@example.com", user_id),
            role,
        }
    }

    #[test_log::test]
    fn test_user_may_access_own_resource() {
        let p = principal(1, Role::User);
        assert!(can_access(&p, 1, Operation::Read));
        assert!(can_access(&p, 1, Operation::Update));
        assert!(can_access(&p, 1, Operation::Delete));
    }

    #[test_log::test]
    fn test_user_is_denied_foreign_resource() {
        let p = principal(1, Role::User);
        assert!(!can_access(&p, 2, Operation::Read));
        assert!(!can_access(&p, 2, Operation::Update));
        assert!(!can_access(&p, 2, Operation::Delete));
    }

    #[test_log::test]
    fn test_admin_may_access_anything() {
        let p = principal(99, Role::Admin);
        for owner in [1, 2, 99, i32::MAX] {
            assert!(can_access(&p, owner, Operation::Read));
            assert!(can_access(&p, owner, Operation::Update));
            assert!(can_access(&p, owner, Operation::Delete));
        }
    }
}
