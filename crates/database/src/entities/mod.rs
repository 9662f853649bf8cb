//! Domain entities for the database layer
//!
//! Simplified entity definitions for use by the repository layer

pub mod conversation;
pub mod notification;
pub mod order;
pub mod product;
pub mod support_message;
pub mod tutor_application;
pub mod user;

// Re-export all entity types
pub use conversation::{Conversation, ConversationMessage, ConversationSummary};
pub use notification::{Notification, NotificationKind};
pub use order::{Order, OrderStatus};
pub use product::{
    CreateProductRequest, Product, ProductCategory, ProductCondition, ProductFilter,
    ProductStatus, UpdateProductRequest,
};
pub use support_message::{CreateSupportMessageRequest, SupportMessage, SupportPriority};
pub use tutor_application::{
    ApplicationStatus, CreateTutorApplicationRequest, TutorApplication, TutorProfile,
};
pub use user::{UpdateUserRequest, User, UserRole, UserStatus};
