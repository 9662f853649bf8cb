//! Database repository implementations

pub mod conversation_repository;
pub mod notification_repository;
pub mod order_repository;
pub mod product_repository;
pub mod support_message_repository;
pub mod tutor_application_repository;
pub mod user_repository;

// Re-export all repositories for convenience
pub use conversation_repository::*;
pub use notification_repository::*;
pub use order_repository::*;
pub use product_repository::*;
pub use support_message_repository::*;
pub use tutor_application_repository::*;
pub use user_repository::*;
