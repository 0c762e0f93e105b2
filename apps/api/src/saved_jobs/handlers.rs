use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::{is_unique_violation, AppError};
use crate::jobs::queries::{fetch_job_detail, JOB_COLUMNS, JOB_JOINS};
use crate::models::saved_job::{SavedJobDetail, SavedJobJoinRow, SavedJobRow};
use crate::models::user::User;
use crate::state::AppState;

/// Embeds the full job listing; a bookmark of a since-deactivated job still
/// renders its details.
async fn assemble(pool: &PgPool, row: SavedJobRow) -> Result<SavedJobDetail, AppError> {
    let job = fetch_job_detail(pool, row.job_id, false)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", row.job_id)))?;
    Ok(SavedJobDetail::from_row(row, job))
}

#[derive(Debug, Deserialize)]
pub struct SavedJobCreate {
    pub job_id: Uuid,
}

/// GET /api/v1/saved-jobs
pub async fn list_saved_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<SavedJobDetail>>, AppError> {
    let rows: Vec<SavedJobJoinRow> = sqlx::query_as(&format!(
        r#"
        SELECT sj.id AS saved_id, sj.user_id AS saved_user_id, sj.saved_at,
               {JOB_COLUMNS}
        FROM saved_jobs sj
        JOIN jobs j ON j.id = sj.job_id
        {JOB_JOINS}
        WHERE sj.user_id = $1
        ORDER BY sj.saved_at DESC
        "#
    ))
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(SavedJobDetail::from).collect()))
}

/// GET /api/v1/saved-jobs/:id
pub async fn get_saved_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedJobDetail>, AppError> {
    let row: Option<SavedJobRow> = sqlx::query_as(
        "SELECT id, user_id, job_id, saved_at FROM saved_jobs WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_else(|| AppError::NotFound(format!("Saved job {id} not found")))?;
    Ok(Json(assemble(&state.db, row).await?))
}

/// POST /api/v1/saved-jobs
pub async fn create_saved_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<SavedJobCreate>,
) -> Result<(StatusCode, Json<SavedJobDetail>), AppError> {
    let row: SavedJobRow = sqlx::query_as(
        r#"
        INSERT INTO saved_jobs (user_id, job_id)
        VALUES ($1, $2)
        RETURNING id, user_id, job_id, saved_at
        "#,
    )
    .bind(user.id)
    .bind(input.job_id)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Validation("job is already saved".to_string())
        } else {
            e.into()
        }
    })?;

    info!("user {} saved job {}", user.username, input.job_id);
    Ok((StatusCode::CREATED, Json(assemble(&state.db, row).await?)))
}

/// DELETE /api/v1/saved-jobs/:id
pub async fn delete_saved_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM saved_jobs WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Saved job {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// 404 body for the unsave action. This endpoint predates the error envelope
/// and its consumers expect the flat `detail` shape.
fn unsave_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Job not found in saved list."})),
    )
        .into_response()
}

/// DELETE /api/v1/saved-jobs/unsave/:job_id
/// Removes the caller's bookmark for a job by the job's id.
pub async fn unsave_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(job_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let result = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
        .bind(user.id)
        .bind(job_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(unsave_not_found());
    }
    info!("user {} unsaved job {job_id}", user.username);
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_unsave_missing_bookmark_body_shape() {
        let resp = unsave_not_found();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Job not found in saved list.");
        assert!(body.get("error").is_none());
    }
}
