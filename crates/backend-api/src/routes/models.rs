//! Response payloads shared across route modules.
//!
//! Entities cross the API boundary keyed by their public ids; internal row
//! ids only appear where clients need to correlate rows they already own.

use serde::Serialize;
use utoipa::ToSchema;
use zenith_database::{
    Conversation, ConversationMessage, ConversationSummary, Notification, Order, Product,
    SupportMessage, TutorApplication, TutorProfile, User,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub role: String,
    pub documents_uploaded: bool,
    pub admin_verified: bool,
    pub verified_tutor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.public_id,
            email: user.email,
            display_name: user.display_name,
            campus: user.campus,
            bio: user.bio,
            avatar_url: user.avatar_url,
            role: user.role.to_string(),
            documents_uploaded: user.documents_uploaded,
            admin_verified: user.admin_verified,
            verified_tutor: user.verified_tutor,
            verification_notes: user.verification_notes,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Condensed user row for the admin verification queue.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_document_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_document_url: Option<String>,
    pub verified_tutor: bool,
    pub updated_at: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.public_id,
            email: user.email,
            display_name: user.display_name,
            campus: user.campus,
            id_document_url: user.id_document_url,
            student_document_url: user.student_document_url,
            verified_tutor: user.verified_tutor,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub seller_id: i64,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub category: String,
    pub condition: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.public_id,
            seller_id: product.seller_id,
            title: product.title,
            description: product.description,
            price_cents: product.price_cents,
            category: product.category.to_string(),
            condition: product.condition.to_string(),
            status: product.status.to_string(),
            rejection_reason: product.rejection_reason,
            image_url: product.image_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsResponse {
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TutorApplicationResponse {
    pub id: String,
    pub user_id: i64,
    pub subjects: String,
    pub qualifications: String,
    pub hourly_rate_cents: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TutorApplication> for TutorApplicationResponse {
    fn from(application: TutorApplication) -> Self {
        Self {
            id: application.public_id,
            user_id: application.user_id,
            subjects: application.subjects,
            qualifications: application.qualifications,
            hourly_rate_cents: application.hourly_rate_cents,
            status: application.status.to_string(),
            rejection_reason: application.rejection_reason,
            verification_notes: application.verification_notes,
            reviewed_at: application.reviewed_at,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TutorApplicationsResponse {
    pub applications: Vec<TutorApplicationResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TutorProfileResponse {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub subjects: String,
    pub qualifications: String,
    pub hourly_rate_cents: i64,
}

impl From<TutorProfile> for TutorProfileResponse {
    fn from(profile: TutorProfile) -> Self {
        Self {
            user_id: profile.user_public_id,
            display_name: profile.display_name,
            campus: profile.campus,
            avatar_url: profile.avatar_url,
            subjects: profile.subjects,
            qualifications: profile.qualifications,
            hourly_rate_cents: profile.hourly_rate_cents,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TutorsResponse {
    pub tutors: Vec<TutorProfileResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: String,
    pub product_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub amount_cents: i64,
    pub status: String,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.public_id,
            product_id: order.product_id,
            buyer_id: order.buyer_id,
            seller_id: order.seller_id,
            amount_cents: order.amount_cents,
            status: order.status.to_string(),
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupportMessageResponse {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub priority: String,
    pub read: bool,
    pub created_at: String,
}

impl From<SupportMessage> for SupportMessageResponse {
    fn from(message: SupportMessage) -> Self {
        Self {
            id: message.id,
            user_id: message.user_id,
            email: message.email,
            subject: message.subject,
            body: message.body,
            priority: message.priority.to_string(),
            read: message.read,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupportMessagesResponse {
    pub messages: Vec<SupportMessageResponse>,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.public_id,
            buyer_id: conversation.buyer_id,
            seller_id: conversation.seller_id,
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConversationSummaryResponse {
    pub id: String,
    pub product_id: String,
    pub product_title: String,
    pub buyer_id: i64,
    pub seller_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    pub updated_at: String,
}

impl From<ConversationSummary> for ConversationSummaryResponse {
    fn from(summary: ConversationSummary) -> Self {
        Self {
            id: summary.public_id,
            product_id: summary.product_public_id,
            product_title: summary.product_title,
            buyer_id: summary.buyer_id,
            seller_id: summary.seller_id,
            buyer_name: summary.buyer_name,
            seller_name: summary.seller_name,
            updated_at: summary.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConversationMessageResponse {
    pub id: String,
    pub sender_id: i64,
    pub body: String,
    pub read: bool,
    pub created_at: String,
}

impl From<ConversationMessage> for ConversationMessageResponse {
    fn from(message: ConversationMessage) -> Self {
        Self {
            id: message.public_id,
            sender_id: message.sender_id,
            body: message.body,
            read: message.read,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind.to_string(),
            title: notification.title,
            body: notification.body,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationSummaryResponse>,
}

#[derive(Debug, Serialize)]
pub struct ConversationMessagesResponse {
    pub messages: Vec<ConversationMessageResponse>,
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationResponse>,
}
