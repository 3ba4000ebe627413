/*
 * Responsibility
 * - chirps CRUD
 * - user_id FK (ON DELETE CASCADE) means resetting users also clears chirps
 * - delete is owner-scoped so the database never removes someone else's chirp
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChirpRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}

#[async_trait]
pub trait ChirpRepo: Send + Sync {
    async fn create(&self, body: &str, owner_id: Uuid) -> RepoResult<ChirpRow>;

    async fn get(&self, chirp_id: Uuid) -> RepoResult<Option<ChirpRow>>;

    async fn list(&self, author_id: Option<Uuid>, order: SortOrder) -> RepoResult<Vec<ChirpRow>>;

    /// Deletes only when `owner_id` owns the chirp. Returns whether a row was removed.
    async fn delete(&self, chirp_id: Uuid, owner_id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgChirpRepo {
    pool: PgPool,
}

impl PgChirpRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChirpRepo for PgChirpRepo {
    async fn create(&self, body: &str, owner_id: Uuid) -> RepoResult<ChirpRow> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            INSERT INTO chirps (body, user_id)
            VALUES ($1, $2)
            RETURNING id, created_at, updated_at, body, user_id
            "#,
        )
        .bind(body)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get(&self, chirp_id: Uuid) -> RepoResult<Option<ChirpRow>> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(chirp_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, author_id: Option<Uuid>, order: SortOrder) -> RepoResult<Vec<ChirpRow>> {
        // ORDER BY direction cannot be bound as a parameter
        let sql = match order {
            SortOrder::OldestFirst => {
                r#"
                SELECT id, created_at, updated_at, body, user_id
                FROM chirps
                WHERE ($1::uuid IS NULL OR user_id = $1)
                ORDER BY created_at ASC
                "#
            }
            SortOrder::NewestFirst => {
                r#"
                SELECT id, created_at, updated_at, body, user_id
                FROM chirps
                WHERE ($1::uuid IS NULL OR user_id = $1)
                ORDER BY created_at DESC
                "#
            }
        };

        let rows = sqlx::query_as::<_, ChirpRow>(sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn delete(&self, chirp_id: Uuid, owner_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM chirps
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(chirp_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
