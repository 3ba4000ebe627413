/*
 * Responsibility
 * - The "authenticated request" type handlers see
 * - middleware validates the session token and stores this in request extensions;
 *   handlers only ever receive this type
 */

use uuid::Uuid;

/// Context attached to an authenticated request.
///
/// `user_id` is the session token's subject. Ownership checks against it are
/// done by the handler (see `services::auth::guard`).
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
}

impl AuthCtx {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
