use serde::Serialize;

/// `POST /refresh` response: a new session token.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}
