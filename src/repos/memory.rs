//! In-memory stand-in for the Postgres repos, used by unit and handler tests.
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::repos::{
    chirp_repo::{ChirpRepo, ChirpRow, SortOrder},
    error::{RepoError, RepoResult},
    refresh_token_repo::RefreshTokenRepo,
    user_repo::{UserRepo, UserRow},
};

#[derive(Debug, Clone)]
struct RefreshTokenEntry {
    token_hash: Vec<u8>,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRow>,
    chirps: Vec<ChirpRow>,
    refresh_tokens: Vec<RefreshTokenEntry>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chirp_count(&self) -> usize {
        self.tables.lock().unwrap().chirps.len()
    }

    pub fn user(&self, user_id: Uuid) -> Option<UserRow> {
        let tables = self.tables.lock().unwrap();
        tables.users.iter().find(|u| u.id == user_id).cloned()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create(&self, email: &str, hashed_password: &str) -> RepoResult<UserRow> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(RepoError::Conflict);
        }

        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            is_chirpy_red: false,
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_credentials(
        &self,
        user_id: Uuid,
        hashed_password: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Option<UserRow>> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(email) = email
            && tables.users.iter().any(|u| u.email == email && u.id != user_id)
        {
            return Err(RepoError::Conflict);
        }

        let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(None);
        };
        if let Some(hashed_password) = hashed_password {
            user.hashed_password = hashed_password.to_string();
        }
        if let Some(email) = email {
            user.email = email.to_string();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn upgrade_to_chirpy_red(&self, user_id: Uuid) -> RepoResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.is_chirpy_red = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> RepoResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let removed = tables.users.len() as u64;
        // mirror ON DELETE CASCADE
        *tables = Tables::default();
        Ok(removed)
    }
}

#[async_trait]
impl ChirpRepo for MemoryStore {
    async fn create(&self, body: &str, owner_id: Uuid) -> RepoResult<ChirpRow> {
        let mut tables = self.tables.lock().unwrap();
        // Keep created_at strictly increasing so ordering is deterministic.
        let now = match tables.chirps.last() {
            Some(last) => last.created_at + Duration::milliseconds(1),
            None => Utc::now(),
        };
        let row = ChirpRow {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id: Some(owner_id),
        };
        tables.chirps.push(row.clone());
        Ok(row)
    }

    async fn get(&self, chirp_id: Uuid) -> RepoResult<Option<ChirpRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.chirps.iter().find(|c| c.id == chirp_id).cloned())
    }

    async fn list(&self, author_id: Option<Uuid>, order: SortOrder) -> RepoResult<Vec<ChirpRow>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<ChirpRow> = tables
            .chirps
            .iter()
            .filter(|c| author_id.is_none() || c.user_id == author_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.created_at);
        if order == SortOrder::NewestFirst {
            rows.reverse();
        }
        Ok(rows)
    }

    async fn delete(&self, chirp_id: Uuid, owner_id: Uuid) -> RepoResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.chirps.len();
        tables
            .chirps
            .retain(|c| !(c.id == chirp_id && c.user_id == Some(owner_id)));
        Ok(tables.chirps.len() < before)
    }
}

#[async_trait]
impl RefreshTokenRepo for MemoryStore {
    async fn insert(
        &self,
        token_hash: Vec<u8>,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.refresh_tokens.iter().any(|t| t.token_hash == token_hash) {
            return Err(RepoError::Conflict);
        }
        tables.refresh_tokens.push(RefreshTokenEntry {
            token_hash,
            user_id,
            expires_at,
            revoked_at: None,
        });
        Ok(())
    }

    async fn find_active_user(
        &self,
        token_hash: Vec<u8>,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Uuid>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .refresh_tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none() && t.expires_at > now)
            .map(|t| t.user_id))
    }

    async fn revoke(&self, token_hash: Vec<u8>, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let mut touched = 0;
        for t in tables
            .refresh_tokens
            .iter_mut()
            .filter(|t| t.token_hash == token_hash)
        {
            t.revoked_at = Some(now);
            touched += 1;
        }
        Ok(touched)
    }
}
