use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::catalog::LookupEntry;

/// Profile row joined with its owner's username and email.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileJoinRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub phone_number: String,
    pub resume_url: Option<String>,
    pub current_title: String,
}

/// Candidate profile response shape. Username and email come from the owning
/// account and are read-only; skills are the attached canonical skill rows.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetail {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub phone_number: String,
    pub skills: Vec<LookupEntry>,
    pub resume_url: Option<String>,
    pub current_title: String,
}

impl ProfileDetail {
    pub fn from_row(row: ProfileJoinRow, skills: Vec<LookupEntry>) -> Self {
        ProfileDetail {
            id: row.id,
            username: row.username,
            email: row.email,
            bio: row.bio,
            phone_number: row.phone_number,
            skills,
            resume_url: row.resume_url,
            current_title: row.current_title,
        }
    }
}
