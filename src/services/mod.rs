pub mod auth;
pub mod moderation;
