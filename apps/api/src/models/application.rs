use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Review pipeline states for an application. Stored as TEXT; the applicant
/// can never set this through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewed => "REVIEWED",
            ApplicationStatus::Interview => "INTERVIEW",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ApplicationStatus::Pending),
            "REVIEWED" => Some(ApplicationStatus::Reviewed),
            "INTERVIEW" => Some(ApplicationStatus::Interview),
            "ACCEPTED" => Some(ApplicationStatus::Accepted),
            "REJECTED" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// Application row joined with the job title and applicant username.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationDetail {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub job_title: String,
    pub applicant_username: String,
    pub date_applied: DateTime<Utc>,
    pub status: String,
    pub cover_letter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Reviewed,
            ApplicationStatus::Interview,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert_eq!(ApplicationStatus::parse("HIRED"), None);
        assert_eq!(ApplicationStatus::parse("pending"), None);
    }
}
