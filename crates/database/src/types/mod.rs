//! Shared types and result types for the database layer

pub mod errors;

// Re-export common types
pub use errors::{
    DatabaseError, MessagingError, NotificationError, OrderError, ProductError, SupportError,
    TutorApplicationError, UserError,
};

// Common result types
pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type UserResult<T> = Result<T, UserError>;
pub type ProductResult<T> = Result<T, ProductError>;
pub type TutorResult<T> = Result<T, TutorApplicationError>;
pub type SupportResult<T> = Result<T, SupportError>;
pub type OrderResult<T> = Result<T, OrderError>;
pub type MessagingResult<T> = Result<T, MessagingError>;
pub type NotificationResult<T> = Result<T, NotificationError>;
