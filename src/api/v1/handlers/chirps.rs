/*
 * Responsibility
 * - /chirps handlers and POST /validate_chirp
 * - bodies go through the Moderator before they are stored or echoed
 * - deletion runs the ownership guard first; a deny aborts with 403
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::chirps::{
            ChirpResponse, CreateChirpRequest, ListChirpsQuery, ValidateChirpRequest,
            ValidateChirpResponse,
        },
        extractors::{AuthCtxExtractor, JsonBody},
    },
    error::AppError,
    services::auth::guard,
    state::AppState,
};

fn parse_chirp_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request("INVALID_ID", "chirp_id must be a UUID"))
}

pub async fn validate_chirp(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ValidateChirpRequest>,
) -> Result<Json<ValidateChirpResponse>, AppError> {
    let cleaned_body = state.moderator.clean(&req.body)?;
    Ok(Json(ValidateChirpResponse { cleaned_body }))
}

pub async fn create_chirp(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<CreateChirpRequest>,
) -> Result<(StatusCode, Json<ChirpResponse>), AppError> {
    let body = state.moderator.clean(&req.body)?;
    let row = state.chirps.create(&body, ctx.user_id).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(query): Query<ListChirpsQuery>,
) -> Result<Json<Vec<ChirpResponse>>, AppError> {
    let author_id = query
        .author_id()
        .map_err(|msg| AppError::bad_request("INVALID_QUERY", msg))?;
    let order = query
        .sort_order()
        .map_err(|msg| AppError::bad_request("INVALID_QUERY", msg))?;

    let rows = state.chirps.list(author_id, order).await?;
    Ok(Json(rows.into_iter().map(ChirpResponse::from).collect()))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> Result<Json<ChirpResponse>, AppError> {
    let chirp_id = parse_chirp_id(&chirp_id)?;

    let row = state
        .chirps
        .get(chirp_id)
        .await?
        .ok_or(AppError::not_found("Chirp"))?;

    Ok(Json(row.into()))
}

pub async fn delete_chirp(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(chirp_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let chirp_id = parse_chirp_id(&chirp_id)?;

    let row = state
        .chirps
        .get(chirp_id)
        .await?
        .ok_or(AppError::not_found("Chirp"))?;

    guard::ensure_can_mutate(ctx.user_id, row.user_id)?;

    // Owner-scoped delete: the row may have vanished since the read.
    if state.chirps.delete(chirp_id, ctx.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Chirp"))
    }
}
