/*
 * Responsibility
 * - users table: identities, credentials and the Chirpy Red flag
 * - UserRepo is the seam handlers depend on; PgUserRepo is the SQLx implementation
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
    pub is_chirpy_red: bool,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, email: &str, hashed_password: &str) -> RepoResult<UserRow>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>>;

    /// `None` fields are left untouched. Returns `None` when the user does not exist.
    async fn update_credentials(
        &self,
        user_id: Uuid,
        hashed_password: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Option<UserRow>>;

    /// Returns `false` when no such user exists.
    async fn upgrade_to_chirpy_red(&self, user_id: Uuid) -> RepoResult<bool>;

    /// Removes every user; chirps and refresh tokens go with them (FK cascade).
    async fn delete_all(&self) -> RepoResult<u64>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, email: &str, hashed_password: &str) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES ($1, $2)
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_credentials(
        &self,
        user_id: Uuid,
        hashed_password: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET
                hashed_password = COALESCE($2, hashed_password),
                email = COALESCE($3, email),
                updated_at = now()
            WHERE id = $1
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(user_id)
        .bind(hashed_password)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn upgrade_to_chirpy_red(&self, user_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_chirpy_red = true, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
