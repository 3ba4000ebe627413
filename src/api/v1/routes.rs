/*
 * Responsibility
 * - v1 URL structure
 * - public routes vs. routes behind the session-token route layer
 * - every v1 request bumps the hit counter
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    chirps::{create_chirp, delete_chirp, get_chirp, list_chirps, validate_chirp},
    health::healthz,
    tokens::{refresh, revoke},
    users::{create_user, login, update_user},
    webhooks::polka_webhook,
};

pub fn routes(state: AppState) -> Router<AppState> {
    // Credentials other than a session token (or none at all)
    let public = Router::new()
        .route("/healthz", get(healthz))
        .route("/validate_chirp", post(validate_chirp))
        .route("/users", post(create_user))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/revoke", post(revoke))
        .route("/chirps", get(list_chirps))
        .route("/chirps/{chirp_id}", get(get_chirp))
        .route("/polka/webhooks", post(polka_webhook));

    let protected = Router::new()
        .route("/users", put(update_user))
        .route("/chirps", post(create_chirp))
        .route("/chirps/{chirp_id}", delete(delete_chirp));
    let protected = middleware::auth::access::apply(protected, state.clone());

    middleware::metrics::apply(public.merge(protected), state)
}
