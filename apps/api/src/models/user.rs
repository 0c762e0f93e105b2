use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Account row. Never serialized directly: the password digest and salt stay
/// inside the service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

/// Public representation of an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserOut {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserOut {
    fn from(user: &User) -> Self {
        UserOut {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
