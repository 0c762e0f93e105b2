use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::company::{CompanyDetail, CompanyJoinRow};

const COMPANY_SELECT: &str = r#"
SELECT
    c.id, c.name, c.description, c.website, c.logo_url,
    i.id AS industry_id, i.name AS industry_name,
    l.id AS location_id, l.name AS location_name
FROM companies c
LEFT JOIN industries i ON i.id = c.industry_id
LEFT JOIN locations l ON l.id = c.location_id"#;

pub async fn list_companies(pool: &PgPool) -> Result<Vec<CompanyDetail>, AppError> {
    let rows: Vec<CompanyJoinRow> =
        sqlx::query_as(&format!("{COMPANY_SELECT} ORDER BY c.name"))
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(CompanyDetail::from).collect())
}

pub async fn fetch_company(pool: &PgPool, id: Uuid) -> Result<Option<CompanyDetail>, AppError> {
    let row: Option<CompanyJoinRow> =
        sqlx::query_as(&format!("{COMPANY_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(CompanyDetail::from))
}
