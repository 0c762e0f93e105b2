use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::{is_unique_violation, AppError};
use crate::models::application::{ApplicationDetail, ApplicationStatus};
use crate::models::user::User;
use crate::state::AppState;

const APPLICATION_SELECT: &str = r#"
SELECT a.id, a.job_id, a.applicant_id,
       j.title AS job_title, u.username AS applicant_username,
       a.date_applied, a.status, a.cover_letter
FROM applications a
JOIN jobs j ON j.id = a.job_id
JOIN users u ON u.id = a.applicant_id"#;

async fn fetch_owned(
    pool: &PgPool,
    id: Uuid,
    applicant_id: Uuid,
) -> Result<Option<ApplicationDetail>, AppError> {
    Ok(
        sqlx::query_as(&format!(
            "{APPLICATION_SELECT} WHERE a.id = $1 AND a.applicant_id = $2"
        ))
        .bind(id)
        .bind(applicant_id)
        .fetch_optional(pool)
        .await?,
    )
}

#[derive(Debug, Deserialize)]
pub struct ApplicationCreate {
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
}

/// Applicant, status and date_applied are server-assigned; only the cover
/// letter is writable after submission.
#[derive(Debug, Deserialize)]
pub struct ApplicationUpdate {
    pub cover_letter: Option<String>,
}

/// GET /api/v1/applications
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<ApplicationDetail>>, AppError> {
    let applications: Vec<ApplicationDetail> = sqlx::query_as(&format!(
        "{APPLICATION_SELECT} WHERE a.applicant_id = $1 ORDER BY a.date_applied DESC"
    ))
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(applications))
}

/// GET /api/v1/applications/:id
pub async fn get_application(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationDetail>, AppError> {
    let application = fetch_owned(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(application))
}

/// POST /api/v1/applications
pub async fn create_application(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<ApplicationCreate>,
) -> Result<(StatusCode, Json<ApplicationDetail>), AppError> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO applications (job_id, applicant_id, status, cover_letter)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(input.job_id)
    .bind(user.id)
    .bind(ApplicationStatus::Pending.as_str())
    .bind(&input.cover_letter)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Validation("you have already applied to this job".to_string())
        } else {
            e.into()
        }
    })?;

    info!("user {} applied to job {}", user.username, input.job_id);
    let application = fetch_owned(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// PUT /api/v1/applications/:id
pub async fn update_application(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<Uuid>,
    Json(input): Json<ApplicationUpdate>,
) -> Result<Json<ApplicationDetail>, AppError> {
    let result = sqlx::query(
        "UPDATE applications SET cover_letter = $1 WHERE id = $2 AND applicant_id = $3",
    )
    .bind(&input.cover_letter)
    .bind(id)
    .bind(user.id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    let application = fetch_owned(&state.db, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(application))
}

/// DELETE /api/v1/applications/:id
pub async fn delete_application(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND applicant_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
