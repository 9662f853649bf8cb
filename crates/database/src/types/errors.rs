//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// User-specific database errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("No verification documents awaiting review")]
    VerificationNotPending,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Product-specific database errors
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("Only the seller may modify this listing")]
    NotOwner,

    #[error("Listing is not awaiting review")]
    NotPending,

    #[error("Listing is not active")]
    NotActive,

    #[error("Listing has already been sold")]
    AlreadySold,

    #[error("A rejection reason is required")]
    ReasonRequired,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Tutor application errors
#[derive(Debug, Error)]
pub enum TutorApplicationError {
    #[error("Application not found")]
    ApplicationNotFound,

    #[error("An application is already pending or approved")]
    ApplicationAlreadyOpen,

    #[error("Application is not awaiting review")]
    NotPending,

    #[error("A rejection reason is required")]
    ReasonRequired,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Support inbox errors
#[derive(Debug, Error)]
pub enum SupportError {
    #[error("Support message not found")]
    MessageNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Checkout and order errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("Listing is not available for purchase")]
    ProductNotAvailable,

    #[error("You cannot buy your own listing")]
    CannotBuyOwnListing,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Buyer/seller messaging errors
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Conversation not found")]
    ConversationNotFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Listing is not open for enquiries")]
    ProductNotAvailable,

    #[error("You cannot message yourself")]
    CannotMessageSelf,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Notification-specific database errors
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification not found")]
    NotificationNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
