use thiserror::Error;

use crate::repos::error::RepoError;

/// Failures of the credential/session layer.
///
/// The variants stay distinct here so callers and logs can tell them apart;
/// the HTTP boundary collapses the client-caused ones into a single 401.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed credential: {0}")]
    MalformedCredential(&'static str),

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("token subject is not a valid identity")]
    MalformedSubject,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    // Absent, expired and revoked refresh tokens are deliberately indistinguishable.
    #[error("not found")]
    NotFound,

    #[error("forbidden")]
    Forbidden,

    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    #[error("entropy source failed: {0}")]
    EntropyFailure(String),

    #[error("token signing failed: {0}")]
    SigningFailure(String),

    #[error(transparent)]
    Persistence(#[from] RepoError),
}

impl AuthError {
    /// Faults on our side (as opposed to a bad credential from the client).
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::HashingFailure(_)
                | Self::EntropyFailure(_)
                | Self::SigningFailure(_)
                | Self::Persistence(_)
        )
    }
}
