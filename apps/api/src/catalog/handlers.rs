use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::skills::get_or_create_skill;
use crate::errors::AppError;
use crate::jobs::filter::escape_like;
use crate::models::catalog::LookupEntry;
use crate::state::AppState;

async fn list_lookup(pool: &PgPool, sql: &str) -> Result<Vec<LookupEntry>, AppError> {
    Ok(sqlx::query_as(sql).fetch_all(pool).await?)
}

async fn get_lookup(
    pool: &PgPool,
    sql: &str,
    id: Uuid,
    kind: &str,
) -> Result<LookupEntry, AppError> {
    let entry: Option<LookupEntry> = sqlx::query_as(sql).bind(id).fetch_optional(pool).await?;
    entry.ok_or_else(|| AppError::NotFound(format!("{kind} {id} not found")))
}

/// GET /api/v1/industries
pub async fn list_industries(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupEntry>>, AppError> {
    Ok(Json(
        list_lookup(&state.db, "SELECT id, name FROM industries ORDER BY name").await?,
    ))
}

/// GET /api/v1/industries/:id
pub async fn get_industry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LookupEntry>, AppError> {
    Ok(Json(
        get_lookup(
            &state.db,
            "SELECT id, name FROM industries WHERE id = $1",
            id,
            "Industry",
        )
        .await?,
    ))
}

/// GET /api/v1/job-types
pub async fn list_job_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupEntry>>, AppError> {
    Ok(Json(
        list_lookup(&state.db, "SELECT id, name FROM job_types ORDER BY name").await?,
    ))
}

/// GET /api/v1/job-types/:id
pub async fn get_job_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LookupEntry>, AppError> {
    Ok(Json(
        get_lookup(
            &state.db,
            "SELECT id, name FROM job_types WHERE id = $1",
            id,
            "Job type",
        )
        .await?,
    ))
}

/// GET /api/v1/locations
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupEntry>>, AppError> {
    Ok(Json(
        list_lookup(&state.db, "SELECT id, name FROM locations ORDER BY name").await?,
    ))
}

/// GET /api/v1/locations/:id
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LookupEntry>, AppError> {
    Ok(Json(
        get_lookup(
            &state.db,
            "SELECT id, name FROM locations WHERE id = $1",
            id,
            "Location",
        )
        .await?,
    ))
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupEntry>>, AppError> {
    Ok(Json(
        list_lookup(&state.db, "SELECT id, name FROM job_categories ORDER BY name").await?,
    ))
}

/// GET /api/v1/categories/:id
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LookupEntry>, AppError> {
    Ok(Json(
        get_lookup(
            &state.db,
            "SELECT id, name FROM job_categories WHERE id = $1",
            id,
            "Category",
        )
        .await?,
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct SkillQuery {
    pub q: Option<String>,
}

/// GET /api/v1/skills
pub async fn list_skills(
    State(state): State<AppState>,
    Query(params): Query<SkillQuery>,
) -> Result<Json<Vec<LookupEntry>>, AppError> {
    let skills: Vec<LookupEntry> = match params.q.as_deref().filter(|q| !q.trim().is_empty()) {
        Some(q) => {
            sqlx::query_as("SELECT id, name FROM skills WHERE name ILIKE $1 ORDER BY name")
                .bind(format!("%{}%", escape_like(q.trim())))
                .fetch_all(&state.db)
                .await?
        }
        None => {
            sqlx::query_as("SELECT id, name FROM skills ORDER BY name")
                .fetch_all(&state.db)
                .await?
        }
    };
    Ok(Json(skills))
}

/// GET /api/v1/skills/:id
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LookupEntry>, AppError> {
    Ok(Json(
        get_lookup(
            &state.db,
            "SELECT id, name FROM skills WHERE id = $1",
            id,
            "Skill",
        )
        .await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct SkillInput {
    pub name: String,
}

/// POST /api/v1/skills
/// Get-or-create: posting an existing name (case-insensitively) returns the
/// canonical row instead of a duplicate.
pub async fn create_skill(
    State(state): State<AppState>,
    Json(input): Json<SkillInput>,
) -> Result<(StatusCode, Json<LookupEntry>), AppError> {
    let mut conn = state.db.acquire().await?;
    let skill = get_or_create_skill(&mut *conn, &input.name).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}
