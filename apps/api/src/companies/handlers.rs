use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::companies::queries;
use crate::errors::AppError;
use crate::models::company::CompanyDetail;
use crate::state::AppState;

/// GET /api/v1/companies
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyDetail>>, AppError> {
    let companies = queries::list_companies(&state.db).await?;
    Ok(Json(companies))
}

/// GET /api/v1/companies/:id
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyDetail>, AppError> {
    let company = queries::fetch_company(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;
    Ok(Json(company))
}
