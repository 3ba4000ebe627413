use chrono::{DateTime, Duration as ChronoDuration, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::repos::refresh_token_repo::RefreshTokenRepo;
use crate::services::auth::error::AuthError;

const REFRESH_TOKEN_BYTES: usize = 32;

/// Opaque, revocable, long-lived credential used to mint new session tokens.
#[derive(Clone)]
pub struct RefreshTokenService {
    repo: Arc<dyn RefreshTokenRepo>,
    ttl_seconds: u64,
}

impl std::fmt::Debug for RefreshTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl RefreshTokenService {
    pub fn new(repo: Arc<dyn RefreshTokenRepo>, ttl_seconds: u64) -> Self {
        Self { repo, ttl_seconds }
    }

    /// Generate a refresh token for `user_id`, store it, and return the raw value.
    pub async fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let expires_at = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(ChronoDuration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| {
                error!(ttl_seconds = self.ttl_seconds, "refresh token ttl out of range");
                AuthError::SigningFailure("refresh token ttl out of range".to_string())
            })?;
        let refresh_token = generate_refresh_token()?;
        self.store(&refresh_token, user_id, expires_at).await?;
        Ok(refresh_token)
    }

    /// Persist `refresh_token` for `user_id` until `expires_at`.
    ///
    /// No uniqueness per user: concurrent sessions each get their own token.
    pub async fn store(
        &self,
        refresh_token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        debug!(
            user_id = %user_id,
            ttl_seconds = self.ttl_seconds,
            expires_at = %expires_at,
            "Storing refresh token"
        );

        self.repo
            .insert(hash_refresh_token(refresh_token), user_id, expires_at)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, error = ?e, "Failed to insert refresh token");
                AuthError::from(e)
            })
    }

    /// Owner of a live refresh token.
    ///
    /// Unknown, expired and revoked tokens all come back as `NotFound`.
    pub async fn resolve(&self, refresh_token: &str) -> Result<Uuid, AuthError> {
        let now = Utc::now();

        let user_id = self
            .repo
            .find_active_user(hash_refresh_token(refresh_token), now)
            .await
            .map_err(|e| {
                error!(error = ?e, now = %now, "Failed to look up refresh token");
                AuthError::from(e)
            })?;

        user_id.ok_or_else(|| {
            debug!("Refresh token not found or inactive");
            AuthError::NotFound
        })
    }

    /// Mark a refresh token revoked so later `resolve` calls fail.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError> {
        let now = Utc::now();

        let touched = self
            .repo
            .revoke(hash_refresh_token(refresh_token), now)
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to revoke refresh token");
                AuthError::from(e)
            })?;

        if touched == 0 {
            debug!("Refresh token to revoke does not exist");
            return Err(AuthError::NotFound);
        }

        debug!(revoked_at = %now, "Revoked refresh token");
        Ok(())
    }
}

/// 32 random bytes, hex-encoded (64 chars).
pub fn generate_refresh_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| {
        error!(error = %e, "getrandom failed");
        AuthError::EntropyFailure(e.to_string())
    })?;

    Ok(hex::encode(bytes))
}

fn hash_refresh_token(token: &str) -> Vec<u8> {
    // sha256(token) -> raw 32 bytes (stored as BYTEA)
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory::MemoryStore;

    fn service(ttl_seconds: u64) -> RefreshTokenService {
        RefreshTokenService::new(Arc::new(MemoryStore::new()), ttl_seconds)
    }

    #[test]
    fn generated_tokens_are_64_hex_chars_and_unique() {
        let a = generate_refresh_token().unwrap();
        let b = generate_refresh_token().unwrap();

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn oversized_ttl_is_an_error_not_a_panic() {
        let svc = service(10_000_000_000_000);

        let res = svc.issue(Uuid::new_v4()).await;
        assert!(matches!(res, Err(AuthError::SigningFailure(_))));
    }

    #[tokio::test]
    async fn issued_token_resolves_to_owner() {
        let svc = service(60);
        let user_id = Uuid::new_v4();

        let token = svc.issue(user_id).await.unwrap();
        assert_eq!(svc.resolve(&token).await.unwrap(), user_id);
    }

    #[tokio::test]
    async fn a_user_may_hold_several_tokens() {
        let svc = service(60);
        let user_id = Uuid::new_v4();

        let first = svc.issue(user_id).await.unwrap();
        let second = svc.issue(user_id).await.unwrap();

        svc.revoke(&first).await.unwrap();
        assert!(matches!(svc.resolve(&first).await, Err(AuthError::NotFound)));
        assert_eq!(svc.resolve(&second).await.unwrap(), user_id);
    }

    #[tokio::test]
    async fn revoked_token_no_longer_resolves() {
        let svc = service(60);
        let token = svc.issue(Uuid::new_v4()).await.unwrap();

        svc.revoke(&token).await.unwrap();
        assert!(matches!(svc.resolve(&token).await, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn expired_token_is_not_found() {
        let svc = service(60);
        let token = generate_refresh_token().unwrap();
        svc.store(&token, Uuid::new_v4(), Utc::now() - ChronoDuration::seconds(1))
            .await
            .unwrap();

        assert!(matches!(svc.resolve(&token).await, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let svc = service(60);
        let token = generate_refresh_token().unwrap();

        assert!(matches!(svc.resolve(&token).await, Err(AuthError::NotFound)));
        assert!(matches!(svc.revoke(&token).await, Err(AuthError::NotFound)));
    }
}
