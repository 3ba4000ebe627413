/*
 * Responsibility
 * - POST /refresh, POST /revoke
 * - both take the refresh token as `Authorization: Bearer <token>`
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::{
    api::v1::dto::tokens::RefreshResponse,
    error::AppError,
    services::auth::{AuthError, header},
    state::AppState,
};

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    let refresh_token = header::bearer_token(&headers)?;
    let token = state.auth.refresh(refresh_token).await?;

    Ok(Json(RefreshResponse { token }))
}

/// Best-effort logout: an unknown token still answers 204.
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let refresh_token = header::bearer_token(&headers)?;

    match state.auth.revoke(refresh_token).await {
        Ok(()) => {}
        Err(AuthError::NotFound) => {
            tracing::info!("revoke: refresh token not found");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(StatusCode::NO_CONTENT)
}
