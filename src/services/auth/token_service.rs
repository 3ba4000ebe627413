use uuid::Uuid;

use crate::config::AuthConfig;
use crate::repos::refresh_token_repo::RefreshTokenRepo;
use crate::services::auth::{
    error::AuthError, jwt::JwtCodec, refresh_token_issuer::RefreshTokenService,
};
use std::sync::Arc;

/// Orchestrates session-token issuance/validation and refresh-token issuance/revocation.
///
/// - JwtCodec is responsible for the stateless session token.
/// - RefreshTokenService is responsible for the opaque refresh token and its persistence.
#[derive(Clone, Debug)]
pub struct TokenService {
    jwt: JwtCodec,
    refresh: RefreshTokenService,
}

impl TokenService {
    pub fn new(config: &AuthConfig, refresh_repo: Arc<dyn RefreshTokenRepo>) -> Self {
        Self {
            jwt: JwtCodec::new(&config.jwt_secret, config.access_token_ttl_seconds),
            refresh: RefreshTokenService::new(refresh_repo, config.refresh_token_ttl_seconds),
        }
    }

    /// Issue a session token plus a fresh refresh token for an authenticated user.
    pub async fn issue_token_pair(&self, user_id: Uuid) -> Result<IssuedTokenPair, AuthError> {
        let access_token = self.jwt.issue(user_id)?;
        let refresh_token = self.refresh.issue(user_id).await?;

        Ok(IssuedTokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mint a new session token against a live refresh token.
    ///
    /// The refresh token itself is returned to the caller unchanged.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let user_id = self.refresh.resolve(refresh_token).await?;
        self.jwt.issue(user_id)
    }

    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.refresh.revoke(refresh_token).await
    }

    /// Validate a session token and return its subject.
    pub fn authenticate(&self, access_token: &str) -> Result<Uuid, AuthError> {
        self.jwt.validate(access_token)
    }
}

/// Service-level return type to keep handlers thin.
#[derive(Clone, Debug)]
pub struct IssuedTokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
