pub mod error;
pub mod guard;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh_token_issuer;
pub mod token_service;

pub use error::AuthError;
pub use token_service::TokenService;
