/*
 * Responsibility
 * - Request extractors shared by v1 handlers
 */
pub mod auth_ctx;
mod json_body;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json_body::JsonBody;
