use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row shape shared by every lookup table: industries, job_types, locations,
/// skills and job_categories are all `{id, name}`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LookupEntry {
    pub id: Uuid,
    pub name: String,
}
