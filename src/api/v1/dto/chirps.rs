/*
 * Responsibility
 * - Chirps request/response DTOs, including the list query string
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::chirp_repo::{ChirpRow, SortOrder};

#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateChirpRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateChirpResponse {
    pub cleaned_body: String,
}

/// `GET /chirps?author_id=<uuid>&sort=asc|desc`
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<String>,
    pub sort: Option<String>,
}

impl ListChirpsQuery {
    pub fn author_id(&self) -> Result<Option<Uuid>, &'static str> {
        match self.author_id.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => Uuid::parse_str(raw)
                .map(Some)
                .map_err(|_| "author_id must be a UUID"),
        }
    }

    pub fn sort_order(&self) -> Result<SortOrder, &'static str> {
        match self.sort.as_deref() {
            None | Some("") | Some("asc") => Ok(SortOrder::OldestFirst),
            Some("desc") => Ok(SortOrder::NewestFirst),
            Some(_) => Err("sort must be 'asc' or 'desc'"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Option<Uuid>,
}

impl From<ChirpRow> for ChirpResponse {
    fn from(row: ChirpRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            body: row.body,
            user_id: row.user_id,
        }
    }
}
