use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::catalog::LookupEntry;
use crate::models::company::CompanyDetail;

/// Flat join row covering a job, its company (with the company's industry and
/// location) and the job's category, location and type lookups.
#[derive(Debug, Clone, FromRow)]
pub struct JobJoinRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub salary_min: i32,
    pub salary_max: i32,
    pub date_posted: DateTime<Utc>,
    pub is_active: bool,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_description: Option<String>,
    pub company_website: Option<String>,
    pub company_logo_url: Option<String>,
    pub company_industry_id: Option<Uuid>,
    pub company_industry_name: Option<String>,
    pub company_location_id: Option<Uuid>,
    pub company_location_name: Option<String>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub location_id: Uuid,
    pub location_name: String,
    pub job_type_id: Uuid,
    pub job_type_name: String,
}

/// Job listing response shape. Company, category, location and job type are
/// nested objects; writes accept the corresponding `*_id` fields instead.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub salary_min: i32,
    pub salary_max: i32,
    pub date_posted: DateTime<Utc>,
    pub is_active: bool,
    pub company: CompanyDetail,
    pub category: Option<LookupEntry>,
    pub location: LookupEntry,
    pub job_type: LookupEntry,
}

impl From<JobJoinRow> for JobDetail {
    fn from(row: JobJoinRow) -> Self {
        let company_industry = match (row.company_industry_id, row.company_industry_name) {
            (Some(id), Some(name)) => Some(LookupEntry { id, name }),
            _ => None,
        };
        let company_location = match (row.company_location_id, row.company_location_name) {
            (Some(id), Some(name)) => Some(LookupEntry { id, name }),
            _ => None,
        };
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(LookupEntry { id, name }),
            _ => None,
        };
        JobDetail {
            id: row.id,
            title: row.title,
            description: row.description,
            salary_min: row.salary_min,
            salary_max: row.salary_max,
            date_posted: row.date_posted,
            is_active: row.is_active,
            company: CompanyDetail {
                id: row.company_id,
                name: row.company_name,
                description: row.company_description,
                industry: company_industry,
                location: company_location,
                website: row.company_website,
                logo_url: row.company_logo_url,
            },
            category,
            location: LookupEntry {
                id: row.location_id,
                name: row.location_name,
            },
            job_type: LookupEntry {
                id: row.job_type_id,
                name: row.job_type_name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> JobJoinRow {
        JobJoinRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            description: "Build APIs".to_string(),
            salary_min: 90_000,
            salary_max: 120_000,
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
        }
    }

    #[test]
    fn test_detail_nests_company_and_lookups() {
        let row = sample_row();
        let company_id = row.company_id;
        let detail = JobDetail::from(row);
        assert_eq!(detail.company.id, company_id);
        assert_eq!(detail.location.name, "Remote");
        assert_eq!(detail.job_type.name, "Full-Time");
        assert!(detail.category.is_none());
    }

    #[test]
    fn test_detail_category_nested_when_present() {
        let mut row = sample_row();
        let cat_id = Uuid::new_v4();
        row.category_id = Some(cat_id);
        row.category_name = Some("Development".to_string());
        let detail = JobDetail::from(row);
        let category = detail.category.expect("category should be nested");
        assert_eq!(category.id, cat_id);
        assert_eq!(category.name, "Development");
    }
}
