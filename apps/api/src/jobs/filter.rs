use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::jobs::queries::{JOB_COLUMNS, JOB_JOINS};

/// Escapes LIKE/ILIKE wildcards (`%`, `_`) and the default backslash escape
/// character so user input always matches as a literal substring.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Optional list filters, AND-combined. `q` is a case-insensitive substring
/// match over job title, job description and company name; the rest are
/// lookup-id equality filters.
#[derive(Debug, Default, Deserialize)]
pub struct JobFilter {
    pub q: Option<String>,
    pub category: Option<Uuid>,
    #[serde(rename = "type")]
    pub job_type: Option<Uuid>,
    pub location: Option<Uuid>,
}

/// Composes the job list query: only active listings, newest first, with each
/// present filter contributing exactly one predicate.
pub fn build_list_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {JOB_COLUMNS} FROM jobs j {JOB_JOINS}"));
    qb.push(" WHERE j.is_active = TRUE");

    if let Some(q) = filter.q.as_deref().filter(|q| !q.trim().is_empty()) {
        let pattern = format!("%{}%", escape_like(q.trim()));
        qb.push(" AND (j.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR j.description ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR c.name ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(category_id) = filter.category {
        qb.push(" AND j.category_id = ");
        qb.push_bind(category_id);
    }
    if let Some(job_type_id) = filter.job_type {
        qb.push(" AND j.job_type_id = ");
        qb.push_bind(job_type_id);
    }
    if let Some(location_id) = filter.location {
        qb.push(" AND j.location_id = ");
        qb.push_bind(location_id);
    }

    qb.push(" ORDER BY j.date_posted DESC");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_is_base_query() {
        let sql = build_list_query(&JobFilter::default()).into_sql();
        assert!(sql.contains("WHERE j.is_active = TRUE"));
        assert!(sql.ends_with("ORDER BY j.date_posted DESC"));
        assert!(!sql.contains("ILIKE"));
        assert!(!sql.contains("category_id ="));
    }

    #[test]
    fn test_text_search_covers_title_description_company() {
        let filter = JobFilter {
            q: Some("rust".to_string()),
            ..JobFilter::default()
        };
        let sql = build_list_query(&filter).into_sql();
        assert!(sql.contains("j.title ILIKE"));
        assert!(sql.contains("j.description ILIKE"));
        assert!(sql.contains("c.name ILIKE"));
    }

    #[test]
    fn test_blank_text_search_ignored() {
        let filter = JobFilter {
            q: Some("   ".to_string()),
            ..JobFilter::default()
        };
        let sql = build_list_query(&filter).into_sql();
        assert!(!sql.contains("ILIKE"));
    }

    #[test]
    fn test_each_id_filter_adds_one_predicate() {
        let filter = JobFilter {
            q: None,
            category: Some(Uuid::new_v4()),
            job_type: Some(Uuid::new_v4()),
            location: Some(Uuid::new_v4()),
        };
        let sql = build_list_query(&filter).into_sql();
        assert_eq!(sql.matches("j.category_id =").count(), 1);
        assert_eq!(sql.matches("j.job_type_id =").count(), 1);
        assert_eq!(sql.matches("j.location_id =").count(), 1);
    }

    #[test]
    fn test_escape_like_percent_matches_literally() {
        assert_eq!(escape_like("50%"), "50\\%");
    }

    #[test]
    fn test_escape_like_underscore_matches_literally() {
        assert_eq!(escape_like("snake_case"), "snake\\_case");
    }

    #[test]
    fn test_escape_like_backslash() {
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_like_plain_text_unchanged() {
        assert_eq!(escape_like("rust engineer"), "rust engineer");
    }

    #[test]
    fn test_filters_are_and_combined() {
        let filter = JobFilter {
            q: Some("rust".to_string()),
            category: Some(Uuid::new_v4()),
            job_type: None,
            location: None,
        };
        let sql = build_list_query(&filter).into_sql();
        assert_eq!(sql.matches(" AND ").count(), 2); // search group + category
    }
}
