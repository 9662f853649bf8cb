//! Notification repository for database operations.

use crate::entities::{Notification, NotificationKind};
use crate::types::{NotificationError, NotificationResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, title, body, read, created_at";

/// Repository for notification database operations
#[derive(Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    /// Create a new notification repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Notification {
        Notification {
            id: row.get("id"),
            user_id: row.get("user_id"),
            kind: NotificationKind::from(row.get::<String, _>("kind").as_str()),
            title: row.get("title"),
            body: row.get("body"),
            read: row.get("read"),
            created_at: row.get("created_at"),
        }
    }

    /// Write a feed entry for a user
    pub async fn create(
        &self,
        user_id: i64,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) -> NotificationResult<Notification> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO notifications (user_id, kind, title, body, read, created_at) VALUES (?, ?, ?, ?, false, ?)"
        )
        .bind(user_id)
        .bind(kind.to_string())
        .bind(title)
        .bind(body)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| NotificationError::DatabaseError(e.to_string()))?;

        let notification_id = result.last_insert_rowid();
        let row = sqlx::query(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?"
        ))
        .bind(notification_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| NotificationError::DatabaseError(e.to_string()))?;

        Ok(Self::map_row(&row))
    }

    /// A user's feed, newest first
    pub async fn list_for_user(
        &self,
        user_id: i64,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> NotificationResult<Vec<Notification>> {
        let mut sql = format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE user_id = ?");
        if unread_only {
            sql.push_str(" AND read = false");
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| NotificationError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Unread count for the nav badge
    pub async fn unread_count(&self, user_id: i64) -> NotificationResult<i64> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND read = false",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| NotificationError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0))
    }

    /// Mark one notification as read; scoped to its owner
    pub async fn mark_read(&self, id: i64, user_id: i64) -> NotificationResult<()> {
        let result = sqlx::query("UPDATE notifications SET read = true WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| NotificationError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(NotificationError::NotificationNotFound);
        }

        Ok(())
    }

    /// Mark the whole feed as read, returning how many entries flipped
    pub async fn mark_all_read(&self, user_id: i64) -> NotificationResult<u32> {
        let result =
            sqlx::query("UPDATE notifications SET read = true WHERE user_id = ? AND read = false")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| NotificationError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() as u32)
    }
}
