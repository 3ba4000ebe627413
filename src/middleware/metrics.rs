//! Request hit counter backing `GET /admin/metrics`.
use std::sync::atomic::Ordering;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, count_hits))
}

async fn count_hits(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);
    next.run(req).await
}
