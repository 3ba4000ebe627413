use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::services::auth::error::AuthError;

/// `iss` stamped on, and required of, every session token.
pub const ISSUER: &str = "chirpy";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 session-token codec.
///
/// - Key material is intentionally not printable via Debug.
/// - Tokens are stateless; there is no revocation list, exposure is bounded by the TTL.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl JwtCodec {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_aud = false;
        // Expiry is checked by hand below: strictly `now < exp`, no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    /// Issue a session token for `subject` with the configured TTL.
    pub fn issue(&self, subject: Uuid) -> Result<String, AuthError> {
        self.issue_with_ttl(subject, self.ttl_seconds)
    }

    pub fn issue_with_ttl(&self, subject: Uuid, ttl_seconds: u64) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl_seconds)
            .map_err(|_| AuthError::SigningFailure("ttl out of range".to_string()))?;

        let claims = SessionClaims {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AuthError::SigningFailure(e.to_string())
        })
    }

    /// Verify signature, issuer and expiry, then return the subject identity.
    pub fn validate(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        if Utc::now().timestamp() >= data.claims.exp {
            return Err(AuthError::Expired);
        }

        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::MalformedSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-please-ignore";

    fn forge(secret: &str, claims: &SessionClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_validates_to_its_subject() {
        let codec = JwtCodec::new(SECRET, 3600);
        let user_id = Uuid::new_v4();

        let token = codec.issue(user_id).unwrap();
        assert_eq!(codec.validate(&token).unwrap(), user_id);
    }

    #[test]
    fn zero_ttl_is_expired_immediately() {
        let codec = JwtCodec::new(SECRET, 3600);
        let token = codec.issue_with_ttl(Uuid::new_v4(), 0).unwrap();

        assert!(matches!(codec.validate(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let issuer = JwtCodec::new(SECRET, 3600);
        let verifier = JwtCodec::new("some-other-secret", 3600);
        let token = issuer.issue(Uuid::new_v4()).unwrap();

        assert!(matches!(
            verifier.validate(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn non_uuid_subject_is_malformed_subject() {
        let codec = JwtCodec::new(SECRET, 3600);
        let now = Utc::now().timestamp();
        let token = forge(
            SECRET,
            &SessionClaims {
                iss: ISSUER.to_string(),
                sub: "not-a-uuid".to_string(),
                iat: now,
                exp: now + 60,
            },
        );

        assert!(matches!(
            codec.validate(&token),
            Err(AuthError::MalformedSubject)
        ));
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let codec = JwtCodec::new(SECRET, 3600);
        let now = Utc::now().timestamp();
        let token = forge(
            SECRET,
            &SessionClaims {
                iss: "someone-else".to_string(),
                sub: Uuid::new_v4().to_string(),
                iat: now,
                exp: now + 60,
            },
        );

        assert!(matches!(
            codec.validate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn garbage_is_invalid_token() {
        let codec = JwtCodec::new(SECRET, 3600);
        assert!(matches!(
            codec.validate("definitely.not.ajwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
