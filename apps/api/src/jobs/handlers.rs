use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::filter::JobFilter;
use crate::jobs::queries;
use crate::models::job::JobDetail;
use crate::state::AppState;

fn default_active() -> bool {
    true
}

/// Write shape for a job listing. Lookup relations are referenced by id;
/// responses nest the full objects instead.
#[derive(Debug, Deserialize)]
pub struct JobInput {
    pub title: String,
    pub description: String,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub location_id: Uuid,
    pub job_type_id: Uuid,
    #[serde(default)]
    pub salary_min: i32,
    #[serde(default)]
    pub salary_max: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Salary bounds: both non-negative, and min cannot exceed max when a max is
/// set (0 means unspecified).
pub fn validate_job_input(input: &JobInput) -> Result<(), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    if input.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    if input.salary_min < 0 || input.salary_max < 0 {
        return Err(AppError::Validation(
            "salaries must be non-negative".to_string(),
        ));
    }
    if input.salary_max > 0 && input.salary_min > input.salary_max {
        return Err(AppError::Validation(
            "salary_min must not exceed salary_max".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/v1/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<JobDetail>>, AppError> {
    let jobs = queries::list_jobs(&state.db, &filter).await?;
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDetail>, AppError> {
    let job = queries::fetch_job_detail(&state.db, id, true)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// POST /api/v1/jobs
pub async fn create_job(
    State(state): State<AppState>,
    Json(input): Json<JobInput>,
) -> Result<(StatusCode, Json<JobDetail>), AppError> {
    validate_job_input(&input)?;
    let id = queries::insert_job(&state.db, &input).await?;
    info!("created job {id}");
    let job = queries::fetch_job_detail(&state.db, id, false)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/v1/jobs/:id
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<JobInput>,
) -> Result<Json<JobDetail>, AppError> {
    validate_job_input(&input)?;
    if !queries::update_job(&state.db, id, &input).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    let job = queries::fetch_job_detail(&state.db, id, false)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !queries::delete_job(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    info!("deleted job {id}");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(salary_min: i32, salary_max: i32) -> JobInput {
        JobInput {
            title: "Backend Engineer".to_string(),
            description: "Build APIs".to_string(),
            company_id: Uuid::new_v4(),
            category_id: None,
            location_id: Uuid::new_v4(),
            job_type_id: Uuid::new_v4(),
            salary_min,
            salary_max,
            is_active: true,
        }
    }

    #[test]
    fn test_valid_salary_range() {
        assert!(validate_job_input(&input(50_000, 90_000)).is_ok());
    }

    #[test]
    fn test_unspecified_salaries_allowed() {
        assert!(validate_job_input(&input(0, 0)).is_ok());
    }

    #[test]
    fn test_min_only_allowed_when_max_unset() {
        assert!(validate_job_input(&input(50_000, 0)).is_ok());
    }

    #[test]
    fn test_negative_salary_rejected() {
        assert!(validate_job_input(&input(-1, 0)).is_err());
        assert!(validate_job_input(&input(0, -1)).is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(validate_job_input(&input(90_000, 50_000)).is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut bad = input(0, 0);
        bad.title = "  ".to_string();
        assert!(validate_job_input(&bad).is_err());
    }
}
