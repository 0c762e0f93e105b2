use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ProfileDetail;
use crate::models::user::User;
use crate::profiles::queries;
use crate::state::AppState;

/// Write shape for a candidate profile. `skill_names` get-or-creates each
/// entry in the canonical skill set and attaches the result; omitted on
/// update, the attached set is left untouched.
#[derive(Debug, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub phone_number: String,
    pub resume_url: Option<String>,
    #[serde(default)]
    pub current_title: String,
    pub skill_names: Option<Vec<String>>,
}

/// GET /api/v1/profiles
pub async fn list_profiles(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<ProfileDetail>>, AppError> {
    let profiles = queries::list_for_user(&state.db, user.id).await?;
    Ok(Json(profiles))
}

/// GET /api/v1/profiles/:id
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileDetail>, AppError> {
    let profile = queries::fetch_owned(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}

/// POST /api/v1/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<ProfileInput>,
) -> Result<(StatusCode, Json<ProfileDetail>), AppError> {
    let id = queries::create_profile(&state.db, user.id, &input).await?;
    info!("created profile {id} for user {}", user.username);
    let profile = queries::fetch_owned(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// PUT /api/v1/profiles/:id
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<Uuid>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<ProfileDetail>, AppError> {
    if !queries::update_profile(&state.db, id, user.id, &input).await? {
        return Err(AppError::NotFound(format!("Profile {id} not found")));
    }
    let profile = queries::fetch_owned(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}

/// DELETE /api/v1/profiles/:id
pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !queries::delete_profile(&state.db, id, user.id).await? {
        return Err(AppError::NotFound(format!("Profile {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
