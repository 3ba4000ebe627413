//! `Authorization` header parsing: `Bearer <token>` and `ApiKey <key>`.
//!
//! Pure string handling, plus a constant-time check for pre-shared keys.
use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::services::auth::error::AuthError;

const BEARER: &str = "Bearer ";
const API_KEY: &str = "ApiKey ";

fn credential<'a>(headers: &'a HeaderMap, scheme: &'static str) -> Result<&'a str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MalformedCredential("missing authorization header"))?
        .to_str()
        .map_err(|_| AuthError::MalformedCredential("authorization header is not ascii"))?;

    let raw = value
        .strip_prefix(scheme)
        .ok_or(AuthError::MalformedCredential("unexpected authorization scheme"))?;

    if raw.is_empty() {
        return Err(AuthError::MalformedCredential("empty credential"));
    }

    Ok(raw)
}

/// `Authorization: Bearer <token>` → `<token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    credential(headers, BEARER)
}

/// `Authorization: ApiKey <key>` → `<key>`.
pub fn api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
    credential(headers, API_KEY)
}

/// Compare a presented key with the configured one without leaking, through
/// timing, how much of it matched or how long it is.
pub fn api_key_matches(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    presented.as_slice().ct_eq(expected.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_malformed() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MalformedCredential(_))
        ));
        assert!(matches!(
            api_key(&headers),
            Err(AuthError::MalformedCredential(_))
        ));
    }

    #[test]
    fn empty_bearer_is_malformed() {
        let headers = with_auth("Bearer ");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MalformedCredential(_))
        ));
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        assert!(bearer_token(&with_auth("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&with_auth("bearer token")).is_err());
        assert!(bearer_token(&with_auth("ApiKey k")).is_err());
        assert!(api_key(&with_auth("Bearer k")).is_err());
    }

    #[test]
    fn api_key_is_extracted() {
        let headers = with_auth("ApiKey f271c81ff7084ee5b99a5091b42d486e");
        assert_eq!(
            api_key(&headers).unwrap(),
            "f271c81ff7084ee5b99a5091b42d486e"
        );
        assert!(api_key(&with_auth("ApiKey ")).is_err());
    }

    #[test]
    fn api_key_comparison_is_exact() {
        let key = "f271c81ff7084ee5b99a5091b42d486e";
        assert!(api_key_matches(key, key));
        assert!(!api_key_matches("f271c81ff7084ee5b99a5091b42d486f", key));
        assert!(!api_key_matches("f271c81ff7084ee5", key));
        assert!(!api_key_matches("", key));
    }
}
