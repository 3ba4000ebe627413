pub mod admin;
pub mod chirps;
pub mod health;
pub mod tokens;
pub mod users;
pub mod webhooks;
