use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// Persistence for opaque refresh tokens.
///
/// Notes:
/// - Only a hash of the refresh token is stored.
/// - A user may hold any number of live tokens (one per login / device).
/// - "Active" means not revoked and not expired; that filter lives in the query,
///   callers do not re-check it.
#[async_trait]
pub trait RefreshTokenRepo: Send + Sync {
    async fn insert(
        &self,
        token_hash: Vec<u8>,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Owner of an active token, if any.
    async fn find_active_user(
        &self,
        token_hash: Vec<u8>,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Uuid>>;

    /// Stamps `revoked_at`/`updated_at`. Returns the number of rows touched (0 when unknown).
    async fn revoke(&self, token_hash: Vec<u8>, now: DateTime<Utc>) -> RepoResult<u64>;
}

#[derive(Clone, Debug)]
pub struct PgRefreshTokenRepo {
    pool: PgPool,
}

impl PgRefreshTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepo for PgRefreshTokenRepo {
    async fn insert(
        &self,
        token_hash: Vec<u8>,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active_user(
        &self,
        token_hash: Vec<u8>,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Uuid>> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM refresh_tokens
            WHERE token_hash = $1
                AND revoked_at IS NULL
                AND expires_at > $2
            LIMIT 1
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user_id)
    }

    async fn revoke(&self, token_hash: Vec<u8>, now: DateTime<Utc>) -> RepoResult<u64> {
        let done = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2,
                updated_at = $2
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected())
    }
}
