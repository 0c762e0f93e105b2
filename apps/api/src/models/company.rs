use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::catalog::LookupEntry;

/// Flat join row for a company with its optional industry and location.
#[derive(Debug, Clone, FromRow)]
pub struct CompanyJoinRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub industry_id: Option<Uuid>,
    pub industry_name: Option<String>,
    pub location_id: Option<Uuid>,
    pub location_name: Option<String>,
}

/// Company response shape with nested industry and location objects.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<LookupEntry>,
    pub location: Option<LookupEntry>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
}

impl From<CompanyJoinRow> for CompanyDetail {
    fn from(row: CompanyJoinRow) -> Self {
        let industry = match (row.industry_id, row.industry_name) {
            (Some(id), Some(name)) => Some(LookupEntry { id, name }),
            _ => None,
        };
        let location = match (row.location_id, row.location_name) {
            (Some(id), Some(name)) => Some(LookupEntry { id, name }),
            _ => None,
        };
        CompanyDetail {
            id: row.id,
            name: row.name,
            description: row.description,
            industry,
            location,
            website: row.website,
            logo_url: row.logo_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(industry: Option<(Uuid, &str)>) -> CompanyJoinRow {
        CompanyJoinRow {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            description: None,
            website: None,
            logo_url: None,
            industry_id: industry.map(|(id, _)| id),
            industry_name: industry.map(|(_, n)| n.to_string()),
            location_id: None,
            location_name: None,
        }
    }

    #[test]
    fn test_nested_industry_present() {
        let id = Uuid::new_v4();
        let detail = CompanyDetail::from(row(Some((id, "Software"))));
        let industry = detail.industry.expect("industry should be nested");
        assert_eq!(industry.id, id);
        assert_eq!(industry.name, "Software");
    }

    #[test]
    fn test_nested_industry_absent() {
        let detail = CompanyDetail::from(row(None));
        assert!(detail.industry.is_none());
        assert!(detail.location.is_none());
    }
}
