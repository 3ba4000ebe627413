/*
 * Responsibility
 * - POST /users, PUT /users, POST /login
 * - Json → DTO validation → password hashing / repo / token service
 * - unknown email and wrong password are indistinguishable to the caller
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::users::{
            CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse,
        },
        extractors::{AuthCtxExtractor, JsonBody},
    },
    error::AppError,
    services::auth::password,
    state::AppState,
};

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_USER", msg))?;

    let digest = password::hash_password(&req.password)?;
    let row = state
        .users
        .create(req.email.trim(), &digest)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict { .. } => {
                AppError::conflict("EMAIL_TAKEN", "email is already registered")
            }
            other => other,
        })?;

    tracing::info!(user_id = %row.id, "user created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let Some(row) = state.users.find_by_email(req.email.trim()).await? else {
        password::verify_without_account(&req.password);
        return Err(AppError::Unauthorized);
    };

    if !password::verify_password(&row.hashed_password, &req.password) {
        tracing::warn!(user_id = %row.id, "login rejected");
        return Err(AppError::Unauthorized);
    }

    let tokens = state.auth.issue_token_pair(row.id).await?;

    Ok(Json(LoginResponse {
        user: row.into(),
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_USER", msg))?;

    let digest = match req.password.as_deref() {
        Some(plain) => Some(password::hash_password(plain)?),
        None => None,
    };
    let email = req.email.as_deref().map(str::trim);

    let row = state
        .users
        .update_credentials(ctx.user_id, digest.as_deref(), email)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict { .. } => {
                AppError::conflict("EMAIL_TAKEN", "email is already registered")
            }
            other => other,
        })?
        .ok_or(AppError::not_found("User"))?;

    Ok(Json(row.into()))
}
