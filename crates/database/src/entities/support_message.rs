//! Support message entity definitions

use serde::{Deserialize, Serialize};

/// An inbound support request. `user_id` is interned when the sender was
/// authenticated, otherwise only the reply email is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportMessage {
    pub id: i64,
    pub user_id: Option<i64>,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub priority: SupportPriority,
    pub read: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for filing a support message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSupportMessageRequest {
    pub user_id: Option<i64>,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub priority: SupportPriority,
}

/// Triage priority for the admin inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl SupportPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportPriority::Low => "low",
            SupportPriority::Normal => "normal",
            SupportPriority::High => "high",
            SupportPriority::Urgent => "urgent",
        }
    }
}

impl From<&str> for SupportPriority {
    fn from(s: &str) -> Self {
        match s {
            "low" => SupportPriority::Low,
            "high" => SupportPriority::High,
            "urgent" => SupportPriority::Urgent,
            _ => SupportPriority::Normal,
        }
    }
}

impl ToString for SupportPriority {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}
