/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - repos behind traits, token service, moderator, webhook key, hit counter
 * - Cheap to Clone (everything inside is Arc/Copy)
 */
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::config::AppEnv;
use crate::repos::{chirp_repo::ChirpRepo, user_repo::UserRepo};
use crate::services::{auth::TokenService, moderation::Moderator};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub chirps: Arc<dyn ChirpRepo>,
    pub auth: Arc<TokenService>,
    pub moderator: Arc<Moderator>,
    pub polka_key: Arc<str>,
    pub app_env: AppEnv,
    // /api/v1 requests served since start (or last reset)
    pub hits: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepo>,
        chirps: Arc<dyn ChirpRepo>,
        auth: Arc<TokenService>,
        polka_key: impl Into<Arc<str>>,
        app_env: AppEnv,
    ) -> Self {
        Self {
            users,
            chirps,
            auth,
            moderator: Arc::new(Moderator::default()),
            polka_key: polka_key.into(),
            app_env,
            hits: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the webhook key
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("moderator", &self.moderator)
            .field("app_env", &self.app_env)
            .field("hits", &self.hits)
            .finish()
    }
}
