//! Support message repository for database operations.

use crate::entities::support_message::SupportPriority;
use crate::entities::{CreateSupportMessageRequest, SupportMessage};
use crate::types::{SupportError, SupportResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const MESSAGE_COLUMNS: &str =
    "id, user_id, email, subject, body, priority, read, created_at, updated_at";

/// Repository for the admin support inbox
#[derive(Clone)]
pub struct SupportMessageRepository {
    pool: SqlitePool,
}

impl SupportMessageRepository {
    /// Create a new support message repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> SupportMessage {
        SupportMessage {
            id: row.get("id"),
            user_id: row.get("user_id"),
            email: row.get("email"),
            subject: row.get("subject"),
            body: row.get("body"),
            priority: SupportPriority::from(row.get::<String, _>("priority").as_str()),
            read: row.get("read"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// File a new support message
    pub async fn create(&self, request: &CreateSupportMessageRequest) -> SupportResult<SupportMessage> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO support_messages (user_id, email, subject, body, priority, read, created_at, updated_at) VALUES (?, ?, ?, ?, ?, false, ?, ?)"
        )
        .bind(request.user_id)
        .bind(&request.email)
        .bind(&request.subject)
        .bind(&request.body)
        .bind(request.priority.to_string())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| SupportError::DatabaseError(e.to_string()))?;

        let message_id = result.last_insert_rowid();
        self.find_by_id(message_id)
            .await?
            .ok_or_else(|| SupportError::DatabaseError("failed to retrieve created message".to_string()))
    }

    /// Find support message by ID
    pub async fn find_by_id(&self, id: i64) -> SupportResult<Option<SupportMessage>> {
        let row = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM support_messages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SupportError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Full inbox, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> SupportResult<Vec<SupportMessage>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM support_messages ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SupportError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Unread messages, newest first
    pub async fn list_unread(&self) -> SupportResult<Vec<SupportMessage>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM support_messages WHERE read = false ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SupportError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Mark a message as handled
    pub async fn mark_read(&self, id: i64) -> SupportResult<()> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query("UPDATE support_messages SET read = true, updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| SupportError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SupportError::MessageNotFound);
        }

        Ok(())
    }

    /// Count of unread messages
    pub async fn count_unread(&self) -> SupportResult<i64> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM support_messages WHERE read = false")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| SupportError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0))
    }
}
