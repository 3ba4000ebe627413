/*
 * Responsibility
 * - /admin URL structure (metrics, reset)
 * - not counted by the hit counter
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::admin::{metrics, reset};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/reset", post(reset))
}
