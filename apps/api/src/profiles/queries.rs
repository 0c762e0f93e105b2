use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::catalog::skills::get_or_create_skill;
use crate::errors::{is_unique_violation, AppError};
use crate::models::catalog::LookupEntry;
use crate::models::profile::{ProfileDetail, ProfileJoinRow};
use crate::profiles::handlers::ProfileInput;

const PROFILE_SELECT: &str = r#"
SELECT p.id, p.user_id, u.username, u.email, p.bio, p.phone_number,
       p.resume_url, p.current_title
FROM user_profiles p
JOIN users u ON u.id = p.user_id"#;

async fn skills_for_profile(
    pool: &PgPool,
    profile_id: Uuid,
) -> Result<Vec<LookupEntry>, AppError> {
    Ok(sqlx::query_as(
        r#"
        SELECT s.id, s.name
        FROM skills s
        JOIN profile_skills ps ON ps.skill_id = s.id
        WHERE ps.profile_id = $1
        ORDER BY s.name
        "#,
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?)
}

async fn assemble(pool: &PgPool, row: ProfileJoinRow) -> Result<ProfileDetail, AppError> {
    let skills = skills_for_profile(pool, row.id).await?;
    Ok(ProfileDetail::from_row(row, skills))
}

/// Lists the caller's profile (at most one row, ownership-scoped).
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<ProfileDetail>, AppError> {
    let row: Option<ProfileJoinRow> =
        sqlx::query_as(&format!("{PROFILE_SELECT} WHERE p.user_id = $1"))
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    match row {
        Some(row) => Ok(vec![assemble(pool, row).await?]),
        None => Ok(vec![]),
    }
}

/// Fetches a profile by id only when owned by the given user.
pub async fn fetch_owned(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<ProfileDetail>, AppError> {
    let row: Option<ProfileJoinRow> =
        sqlx::query_as(&format!("{PROFILE_SELECT} WHERE p.id = $1 AND p.user_id = $2"))
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    match row {
        Some(row) => Ok(Some(assemble(pool, row).await?)),
        None => Ok(None),
    }
}

/// Replaces the attached skill set with the get-or-created rows for the given
/// names. Runs inside the caller's transaction.
async fn set_profile_skills(
    conn: &mut PgConnection,
    profile_id: Uuid,
    skill_names: &[String],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM profile_skills WHERE profile_id = $1")
        .bind(profile_id)
        .execute(&mut *conn)
        .await?;

    for name in skill_names {
        let skill = get_or_create_skill(&mut *conn, name).await?;
        // ON CONFLICT: input lists like ["Rust", "rust"] collapse to one row.
        sqlx::query(
            "INSERT INTO profile_skills (profile_id, skill_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(profile_id)
        .bind(skill.id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Creates the caller's profile, attaching any requested skills atomically.
pub async fn create_profile(
    pool: &PgPool,
    user_id: Uuid,
    input: &ProfileInput,
) -> Result<Uuid, AppError> {
    let mut tx = pool.begin().await?;

    let profile_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO user_profiles (user_id, bio, phone_number, resume_url, current_title)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(&input.bio)
    .bind(&input.phone_number)
    .bind(&input.resume_url)
    .bind(&input.current_title)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Validation("a profile already exists for this user".to_string())
        } else {
            e.into()
        }
    })?;

    if let Some(names) = &input.skill_names {
        set_profile_skills(&mut *tx, profile_id, names).await?;
    }

    tx.commit().await?;
    Ok(profile_id)
}

/// Full update of an owned profile. `skill_names`, when present, replaces the
/// attached set; when omitted the set is untouched. Returns false when the
/// profile is missing or not owned.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    input: &ProfileInput,
) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE user_profiles
        SET bio = $1, phone_number = $2, resume_url = $3, current_title = $4
        WHERE id = $5 AND user_id = $6
        "#,
    )
    .bind(&input.bio)
    .bind(&input.phone_number)
    .bind(&input.resume_url)
    .bind(&input.current_title)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    if let Some(names) = &input.skill_names {
        set_profile_skills(&mut *tx, id, names).await?;
    }

    tx.commit().await?;
    Ok(true)
}

/// Deletes an owned profile. Returns false when missing or not owned.
pub async fn delete_profile(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM user_profiles WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
