//! Zenith Database Crate
//!
//! This crate provides database functionality for the Zenith marketplace
//! backend, including connection management, migrations, and repository
//! implementations for listings, tutoring, support and messaging.

use sqlx::SqlitePool;
use zenith_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::{prepare_database, DatabaseConnection};
pub use migrations::{run_migrations, MIGRATOR};

// Re-export repositories
pub use repos::{
    ConversationRepository, NotificationRepository, OrderRepository, ProductRepository,
    SupportMessageRepository, TutorApplicationRepository, UserRepository,
};

// Re-export entities
pub use entities::{
    conversation::{Conversation, ConversationMessage, ConversationSummary},
    notification::{Notification, NotificationKind},
    order::{Order, OrderStatus},
    product::{
        CreateProductRequest, Product, ProductCategory, ProductCondition, ProductFilter,
        ProductStatus, UpdateProductRequest,
    },
    support_message::{CreateSupportMessageRequest, SupportMessage, SupportPriority},
    tutor_application::{
        ApplicationStatus, CreateTutorApplicationRequest, TutorApplication, TutorProfile,
    },
    user::{UpdateUserRequest, User, UserRole, UserStatus},
};

// Re-export types
pub use types::{
    errors::{
        DatabaseError, MessagingError, NotificationError, OrderError, ProductError, SupportError,
        TutorApplicationError, UserError,
    },
    DatabaseResult, MessagingResult, NotificationResult, OrderResult, ProductResult,
    SupportResult, TutorResult, UserResult,
};

/// Re-export commonly used types for convenience
pub use sqlx::Pool;

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
