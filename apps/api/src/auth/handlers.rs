use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::middleware::TokenKey;
use crate::auth::{generate_salt, generate_token_key, hash_password, verify_password};
use crate::errors::{is_unique_violation, AppError};
use crate::models::user::{User, UserOut};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

/// POST /api/v1/auth/users
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserOut>), AppError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::Validation("a valid email is required".to_string()));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let salt = generate_salt();
    let digest = hash_password(&req.password, &salt);

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (username, email, password_digest, password_salt)
        VALUES ($1, $2, $3, $4)
        RETURNING id, username, email, password_digest, password_salt, created_at
        "#,
    )
    .bind(username)
    .bind(req.email.trim())
    .bind(&digest)
    .bind(&salt)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Validation("username is already taken".to_string())
        } else {
            e.into()
        }
    })?;

    info!("registered user {}", user.username);
    Ok((StatusCode::CREATED, Json(UserOut::from(&user))))
}

/// POST /api/v1/auth/token/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user: Option<User> = sqlx::query_as(
        r#"
        SELECT id, username, email, password_digest, password_salt, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(req.username.trim())
    .fetch_optional(&state.db)
    .await?;

    let user = user
        .filter(|u| verify_password(&req.password, &u.password_salt, &u.password_digest))
        .ok_or_else(|| {
            AppError::Validation("unable to log in with provided credentials".to_string())
        })?;

    let key = generate_token_key();
    sqlx::query("INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2)")
        .bind(&key)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    info!("issued token for user {}", user.username);
    Ok(Json(TokenResponse { auth_token: key }))
}

/// POST /api/v1/auth/token/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Extension(token): Extension<TokenKey>,
) -> Result<StatusCode, AppError> {
    sqlx::query("DELETE FROM auth_tokens WHERE key = $1 AND user_id = $2")
        .bind(&token.0)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
