//! Single-owner authorization for mutating operations.
use uuid::Uuid;

use crate::services::auth::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

pub fn can_mutate(requester: Uuid, owner: Uuid) -> Decision {
    if requester == owner {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// `can_mutate` as a `Result`, so a deny stops the caller with `?`.
///
/// A resource with no recorded owner is never mutable.
pub fn ensure_can_mutate(requester: Uuid, owner: Option<Uuid>) -> Result<(), AuthError> {
    match owner.map(|owner| can_mutate(requester, owner)) {
        Some(Decision::Allow) => Ok(()),
        _ => Err(AuthError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_may_mutate() {
        let a = Uuid::new_v4();
        assert_eq!(can_mutate(a, a), Decision::Allow);
        assert!(ensure_can_mutate(a, Some(a)).is_ok());
    }

    #[test]
    fn anyone_else_is_denied() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(can_mutate(a, b), Decision::Deny);
        assert!(matches!(
            ensure_can_mutate(a, Some(b)),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn ownerless_resource_is_denied() {
        assert!(matches!(
            ensure_can_mutate(Uuid::new_v4(), None),
            Err(AuthError::Forbidden)
        ));
    }
}
