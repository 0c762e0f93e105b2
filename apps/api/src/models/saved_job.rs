use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::job::{JobDetail, JobJoinRow};

#[derive(Debug, Clone, FromRow)]
pub struct SavedJobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

/// Bookmark response shape embedding the full job listing.
#[derive(Debug, Clone, Serialize)]
pub struct SavedJobDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub job_details: JobDetail,
}

impl SavedJobDetail {
    pub fn from_row(row: SavedJobRow, job_details: JobDetail) -> Self {
        SavedJobDetail {
            id: row.id,
            user_id: row.user_id,
            job_id: row.job_id,
            saved_at: row.saved_at,
            job_details,
        }
    }
}

/// Flat join row for a bookmark with its full job listing, so list endpoints
/// come back in one query. The bookmark's own columns are aliased `saved_*`
/// to keep them apart from the job's.
#[derive(Debug, Clone, FromRow)]
pub struct SavedJobJoinRow {
    pub saved_id: Uuid,
    pub saved_user_id: Uuid,
    pub saved_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub job: JobJoinRow,
}

impl From<SavedJobJoinRow> for SavedJobDetail {
    fn from(row: SavedJobJoinRow) -> Self {
        SavedJobDetail {
            id: row.saved_id,
            user_id: row.saved_user_id,
            job_id: row.job.id,
            saved_at: row.saved_at,
            job_details: JobDetail::from(row.job),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_row_maps_job_id_from_embedded_job() {
        let job_id = Uuid::new_v4();
        let saved_id = Uuid::new_v4();
        let row = SavedJobJoinRow {
            saved_id,
            saved_user_id: Uuid::new_v4(),
            saved_at: Utc::now(),
            job: JobJoinRow {
                id: job_id,
                title: "Backend Engineer".to_string(),
                description: "Build APIs".to_string(),
                salary_min: 0,
                salary_max: 0,
                date_posted: Utc::now(),
                is_active: true,
                company_id: Uuid::new_v4(),
                company_name: "Acme".to_string(),
                company_description: None,
                company_website: None,
                company_logo_url: None,
                company_industry_id: None,
                company_industry_name: None,
                company_location_id: None,
                company_location_name: None,
                category_id: None,
                category_name: None,
                location_id: Uuid::new_v4(),
                location_name: "Remote".to_string(),
                job_type_id: Uuid::new_v4(),
                job_type_name: "Full-Time".to_string(),
            },
        };
        let detail = SavedJobDetail::from(row);
        assert_eq!(detail.id, saved_id);
        assert_eq!(detail.job_id, job_id);
        assert_eq!(detail.job_details.id, job_id);
        assert_eq!(detail.job_details.company.name, "Acme");
    }
}
