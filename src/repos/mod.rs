pub mod chirp_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod refresh_token_repo;
pub mod user_repo;
