use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::parse_token_header;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// The token key the request authenticated with. Kept in request extensions
/// so logout can delete exactly the presented token.
#[derive(Debug, Clone)]
pub struct TokenKey(pub String);

/// Token authentication layer for protected routes.
/// Resolves `Authorization: Token <key>` to a user and injects `Arc<User>`
/// into request extensions; rejects with 401 otherwise.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_token_header)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let user: Option<User> = sqlx::query_as(
        r#"
        SELECT u.id, u.username, u.email, u.password_digest, u.password_salt, u.created_at
        FROM users u
        JOIN auth_tokens t ON t.user_id = u.id
        WHERE t.key = $1
        "#,
    )
    .bind(&key)
    .fetch_optional(&state.db)
    .await?;

    let user = user.ok_or_else(|| {
        tracing::warn!("rejected request with unknown token");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(Arc::new(user));
    request.extensions_mut().insert(TokenKey(key));
    Ok(next.run(request).await)
}
