/*
 * Responsibility
 * - POST /polka/webhooks
 * - `Authorization: ApiKey <key>` must match the configured key exactly
 *   (constant-time comparison)
 * - only `user.upgraded` has an effect; every other event is acknowledged
 */
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

use crate::{
    api::v1::dto::webhooks::{PolkaWebhook, USER_UPGRADED},
    error::AppError,
    services::auth::header,
    state::AppState,
};

pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let key = header::api_key(&headers)?;
    if !header::api_key_matches(key, &state.polka_key) {
        tracing::warn!("webhook rejected: api key mismatch");
        return Err(AppError::Unauthorized);
    }

    let event: PolkaWebhook = serde_json::from_slice(&body)
        .map_err(|e| AppError::bad_request("INVALID_WEBHOOK", e.to_string()))?;

    if event.event != USER_UPGRADED {
        tracing::debug!(event = %event.event, "webhook ignored");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = Uuid::parse_str(&event.data.user_id)
        .map_err(|_| AppError::bad_request("INVALID_WEBHOOK", "data.user_id must be a UUID"))?;

    if !state.users.upgrade_to_chirpy_red(user_id).await? {
        return Err(AppError::not_found("User"));
    }

    tracing::info!(%user_id, "user upgraded to chirpy red");
    Ok(StatusCode::NO_CONTENT)
}
