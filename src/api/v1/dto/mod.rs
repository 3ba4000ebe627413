pub mod chirps;
pub mod tokens;
pub mod users;
pub mod webhooks;
