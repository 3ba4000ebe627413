//! CORS for browser clients of the chirp API.
//!
//! Credentials are never allowed: sessions travel in the `Authorization`
//! header, not in cookies. Development answers any origin; production only
//! the exact origins listed in `CORS_ALLOWED_ORIGINS` (none by default).

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::{AppEnv, Config};
use crate::middleware::http::REQUEST_ID_HEADER;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(10 * 60);

fn exact_origins(origins: &[String]) -> AllowOrigin {
    let list = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    AllowOrigin::list(list)
}

pub fn layer(app_env: AppEnv, origins: &[String]) -> CorsLayer {
    let allow_origin = match app_env {
        AppEnv::Development => AllowOrigin::any(),
        AppEnv::Production => exact_origins(origins),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(PREFLIGHT_MAX_AGE)
}

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config.app_env, &config.cors_allowed_origins))
}
