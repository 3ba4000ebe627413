/*
 * Responsibility
 * - Public surface of the middleware layer
 * - Transport-wide layers (http, cors, security_headers) apply to the whole app;
 *   auth::access and metrics are attached per route group in api::v1::routes
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod metrics;
pub mod security_headers;
