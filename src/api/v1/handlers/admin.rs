/*
 * Responsibility
 * - GET /admin/metrics, POST /admin/reset
 * - reset is refused outright in production
 */
use std::sync::atomic::Ordering;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{error::AppError, state::AppState};

pub async fn metrics(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "hits": state.hits.load(Ordering::Relaxed) }))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    if state.app_env.is_production() {
        tracing::warn!("reset refused in production");
        return Err(AppError::Forbidden);
    }

    let deleted = state.users.delete_all().await?;
    state.hits.store(0, Ordering::Relaxed);

    tracing::info!(deleted, "all users deleted, hit counter reset");
    Ok(Json(json!({ "deleted_users": deleted, "hits": 0 })))
}
