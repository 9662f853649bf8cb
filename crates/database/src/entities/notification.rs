//! Notification entity definitions

use serde::{Deserialize, Serialize};

/// A per-user feed entry written by moderation, checkout and messaging flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: String,
}

/// What triggered the notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NotificationKind {
    System,
    ProductApproved,
    ProductRejected,
    ProductSold,
    TutorApproved,
    TutorRejected,
    VerificationApproved,
    VerificationRejected,
    NewMessage,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::System => "system",
            NotificationKind::ProductApproved => "product_approved",
            NotificationKind::ProductRejected => "product_rejected",
            NotificationKind::ProductSold => "product_sold",
            NotificationKind::TutorApproved => "tutor_approved",
            NotificationKind::TutorRejected => "tutor_rejected",
            NotificationKind::VerificationApproved => "verification_approved",
            NotificationKind::VerificationRejected => "verification_rejected",
            NotificationKind::NewMessage => "new_message",
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(s: &str) -> Self {
        match s {
            "product_approved" => NotificationKind::ProductApproved,
            "product_rejected" => NotificationKind::ProductRejected,
            "product_sold" => NotificationKind::ProductSold,
            "tutor_approved" => NotificationKind::TutorApproved,
            "tutor_rejected" => NotificationKind::TutorRejected,
            "verification_approved" => NotificationKind::VerificationApproved,
            "verification_rejected" => NotificationKind::VerificationRejected,
            "new_message" => NotificationKind::NewMessage,
            _ => NotificationKind::System,
        }
    }
}

impl ToString for NotificationKind {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}
