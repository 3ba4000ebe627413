//! Session-token check for protected routes → AuthCtx in request extensions.
//!
//! - `Authorization: Bearer <jwt>` is parsed and the JWT validated (signature, issuer, expiry)
//! - the token subject becomes `AuthCtx.user_id`
//! - whether the subject still exists is left to the handler's own queries

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::header;
use crate::state::AppState;

/// Require a valid session token on every route of `router`.
///
/// Use as a route layer so unmatched paths still 404 instead of 401:
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = {
        let token = header::bearer_token(req.headers())?;
        state.auth.authenticate(token)?
    };

    // middleware → extractor
    req.extensions_mut().insert(AuthCtx::new(user_id));

    Ok(next.run(req).await)
}
