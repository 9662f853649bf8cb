//! Tutor application entity definitions

use serde::{Deserialize, Serialize};

/// An application to become a verified tutor, reviewed by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorApplication {
    pub id: i64,
    pub public_id: String,
    pub user_id: i64,
    pub subjects: String,
    pub qualifications: String,
    pub hourly_rate_cents: i64,
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub verification_notes: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for submitting a tutor application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTutorApplicationRequest {
    pub subjects: String,
    pub qualifications: String,
    pub hourly_rate_cents: i64,
}

/// Public profile row for an approved tutor, joined against the user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorProfile {
    pub user_public_id: String,
    pub display_name: Option<String>,
    pub campus: Option<String>,
    pub avatar_url: Option<String>,
    pub subjects: String,
    pub qualifications: String,
    pub hourly_rate_cents: i64,
}

/// Application lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(s: &str) -> Self {
        match s {
            "approved" => ApplicationStatus::Approved,
            "rejected" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Pending,
        }
    }
}

impl ToString for ApplicationStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}
