use sqlx::PgConnection;

use crate::errors::AppError;
use crate::models::catalog::LookupEntry;

/// Normalizes a free-text skill name for canonical matching: trims
/// surrounding whitespace and rejects empty input. The trimmed casing is
/// preserved as the display name; matching is case-insensitive.
pub fn normalize_skill_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Get-or-create against the canonical skill set. Insert-or-ignore then
/// select, so concurrent creators of the same name converge on one row
/// (unique index on lower(name)).
pub async fn get_or_create_skill(
    conn: &mut PgConnection,
    raw_name: &str,
) -> Result<LookupEntry, AppError> {
    let name = normalize_skill_name(raw_name)
        .ok_or_else(|| AppError::Validation("skill name must not be empty".to_string()))?;

    sqlx::query("INSERT INTO skills (name) VALUES ($1) ON CONFLICT DO NOTHING")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    let skill: LookupEntry =
        sqlx::query_as("SELECT id, name FROM skills WHERE lower(name) = lower($1)")
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;
    Ok(skill)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_skill_name("  Rust  "), Some("Rust"));
    }

    #[test]
    fn test_normalize_preserves_casing() {
        assert_eq!(normalize_skill_name("PostgreSQL"), Some("PostgreSQL"));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert_eq!(normalize_skill_name(""), None);
        assert_eq!(normalize_skill_name("   "), None);
    }
}
