//! User entity definitions

use serde::{Deserialize, Serialize};

/// A marketplace account. Verification document URLs and flags drive the
/// identity review queue surfaced to administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub public_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub campus: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub id_document_url: Option<String>,
    pub student_document_url: Option<String>,
    pub documents_uploaded: bool,
    pub admin_verified: bool,
    pub verified_tutor: bool,
    pub verification_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

/// Request for updating profile fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub campus: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// User role enum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl ToString for UserRole {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

/// User status enum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Suspended,
    Deleted,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
            UserStatus::Deleted => "deleted",
        }
    }
}

impl From<&str> for UserStatus {
    fn from(s: &str) -> Self {
        match s {
            "suspended" => UserStatus::Suspended,
            "deleted" => UserStatus::Deleted,
            _ => UserStatus::Active,
        }
    }
}

impl ToString for UserStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}
