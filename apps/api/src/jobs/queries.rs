use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::filter::{build_list_query, JobFilter};
use crate::jobs::handlers::JobInput;
use crate::models::job::{JobDetail, JobJoinRow};

/// Column list and join clauses for job listings with company, category,
/// location and job type joined in. Kept separate so other resources (saved
/// jobs) can embed the same flat row in a single query.
pub(crate) const JOB_COLUMNS: &str = r#"j.id, j.title, j.description, j.salary_min, j.salary_max,
    j.date_posted, j.is_active,
    c.id AS company_id, c.name AS company_name, c.description AS company_description,
    c.website AS company_website, c.logo_url AS company_logo_url,
    ci.id AS company_industry_id, ci.name AS company_industry_name,
    cl.id AS company_location_id, cl.name AS company_location_name,
    cat.id AS category_id, cat.name AS category_name,
    l.id AS location_id, l.name AS location_name,
    jt.id AS job_type_id, jt.name AS job_type_name"#;

pub(crate) const JOB_JOINS: &str = r#"JOIN companies c ON c.id = j.company_id
LEFT JOIN industries ci ON ci.id = c.industry_id
LEFT JOIN locations cl ON cl.id = c.location_id
LEFT JOIN job_categories cat ON cat.id = j.category_id
JOIN locations l ON l.id = j.location_id
JOIN job_types jt ON jt.id = j.job_type_id"#;

/// Lists active jobs matching the filter, newest first.
pub async fn list_jobs(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobDetail>, AppError> {
    let mut query = build_list_query(filter);
    let rows: Vec<JobJoinRow> = query.build_query_as().fetch_all(pool).await?;
    Ok(rows.into_iter().map(JobDetail::from).collect())
}

/// Fetches one job with its nested objects. `active_only` matches the public
/// API visibility rule; embedding paths (saved jobs) pass false.
pub async fn fetch_job_detail(
    pool: &PgPool,
    id: Uuid,
    active_only: bool,
) -> Result<Option<JobDetail>, AppError> {
    let mut qb: QueryBuilder<'_, Postgres> =
        QueryBuilder::new(format!("SELECT {JOB_COLUMNS} FROM jobs j {JOB_JOINS}"));
    qb.push(" WHERE j.id = ");
    qb.push_bind(id);
    if active_only {
        qb.push(" AND j.is_active = TRUE");
    }
    let row: Option<JobJoinRow> = qb.build_query_as().fetch_optional(pool).await?;
    Ok(row.map(JobDetail::from))
}

/// Inserts a job listing and returns its id. Unknown lookup ids surface as
/// FK violations and map to 400.
pub async fn insert_job(pool: &PgPool, input: &JobInput) -> Result<Uuid, AppError> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO jobs
            (title, description, company_id, category_id, location_id, job_type_id,
             salary_min, salary_max, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.company_id)
    .bind(input.category_id)
    .bind(input.location_id)
    .bind(input.job_type_id)
    .bind(input.salary_min)
    .bind(input.salary_max)
    .bind(input.is_active)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Full update of an active job listing. Returns false when no active job
/// matches the id.
pub async fn update_job(pool: &PgPool, id: Uuid, input: &JobInput) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE jobs
        SET title = $1, description = $2, company_id = $3, category_id = $4,
            location_id = $5, job_type_id = $6, salary_min = $7, salary_max = $8,
            is_active = $9
        WHERE id = $10 AND is_active = TRUE
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.company_id)
    .bind(input.category_id)
    .bind(input.location_id)
    .bind(input.job_type_id)
    .bind(input.salary_min)
    .bind(input.salary_max)
    .bind(input.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Deletes an active job listing. Returns false when nothing was deleted.
pub async fn delete_job(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND is_active = TRUE")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
