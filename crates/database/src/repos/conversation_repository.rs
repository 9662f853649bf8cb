//! Conversation repository for buyer/seller messaging.

use crate::entities::{Conversation, ConversationMessage, ConversationSummary};
use crate::types::{MessagingError, MessagingResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const CONVERSATION_COLUMNS: &str =
    "id, public_id, product_id, buyer_id, seller_id, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, public_id, conversation_id, sender_id, body, read, created_at";

/// Repository for conversation database operations
#[derive(Clone)]
pub struct ConversationRepository {
    pool: SqlitePool,
}

impl ConversationRepository {
    /// Create a new conversation repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_conversation(row: &SqliteRow) -> Conversation {
        Conversation {
            id: row.get("id"),
            public_id: row.get("public_id"),
            product_id: row.get("product_id"),
            buyer_id: row.get("buyer_id"),
            seller_id: row.get("seller_id"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    fn map_message(row: &SqliteRow) -> ConversationMessage {
        ConversationMessage {
            id: row.get("id"),
            public_id: row.get("public_id"),
            conversation_id: row.get("conversation_id"),
            sender_id: row.get("sender_id"),
            body: row.get("body"),
            read: row.get("read"),
            created_at: row.get("created_at"),
        }
    }

    /// Open (or return the existing) thread between a buyer and the seller
    /// of an active listing. Threads survive the listing being sold later,
    /// but new ones only start on active listings.
    pub async fn start(
        &self,
        buyer_id: i64,
        product_public_id: &str,
    ) -> MessagingResult<Conversation> {
        let product = sqlx::query("SELECT id, seller_id, status FROM products WHERE public_id = ?")
            .bind(product_public_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?
            .ok_or(MessagingError::ProductNotFound)?;

        let product_id: i64 = product.get("id");
        let seller_id: i64 = product.get("seller_id");
        let status: String = product.get("status");

        if seller_id == buyer_id {
            return Err(MessagingError::CannotMessageSelf);
        }

        if let Some(existing) = self.find_by_product_and_buyer(product_id, buyer_id).await? {
            return Ok(existing);
        }

        if status != "active" {
            return Err(MessagingError::ProductNotAvailable);
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT OR IGNORE INTO conversations (public_id, product_id, buyer_id, seller_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(cuid2::create_id())
        .bind(product_id)
        .bind(buyer_id)
        .bind(seller_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        self.find_by_product_and_buyer(product_id, buyer_id)
            .await?
            .ok_or(MessagingError::ConversationNotFound)
    }

    async fn find_by_product_and_buyer(
        &self,
        product_id: i64,
        buyer_id: i64,
    ) -> MessagingResult<Option<Conversation>> {
        let row = sqlx::query(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE product_id = ? AND buyer_id = ?"
        ))
        .bind(product_id)
        .bind(buyer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_conversation))
    }

    /// A thread, visible only to its two participants
    pub async fn find_for_participant(
        &self,
        public_id: &str,
        user_id: i64,
    ) -> MessagingResult<Option<Conversation>> {
        let row = sqlx::query(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE public_id = ? AND (buyer_id = ? OR seller_id = ?)"
        ))
        .bind(public_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_conversation))
    }

    /// All threads a user takes part in, most recently active first
    pub async fn list_for_user(&self, user_id: i64) -> MessagingResult<Vec<ConversationSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.public_id, c.buyer_id, c.seller_id, c.created_at, c.updated_at,
                   p.public_id AS product_public_id, p.title AS product_title,
                   bu.display_name AS buyer_name, se.display_name AS seller_name
            FROM conversations c
            JOIN products p ON p.id = c.product_id
            JOIN users bu ON bu.id = c.buyer_id
            JOIN users se ON se.id = c.seller_id
            WHERE c.buyer_id = ? OR c.seller_id = ?
            ORDER BY c.updated_at DESC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| ConversationSummary {
                id: row.get("id"),
                public_id: row.get("public_id"),
                product_public_id: row.get("product_public_id"),
                product_title: row.get("product_title"),
                buyer_id: row.get("buyer_id"),
                seller_id: row.get("seller_id"),
                buyer_name: row.get("buyer_name"),
                seller_name: row.get("seller_name"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            })
            .collect())
    }

    /// Messages in thread order
    pub async fn messages(
        &self,
        conversation_id: i64,
        limit: i64,
        offset: i64,
    ) -> MessagingResult<Vec<ConversationMessage>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM conversation_messages WHERE conversation_id = ? ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?"
        ))
        .bind(conversation_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_message).collect())
    }

    /// Append a message and bump the thread's activity timestamp
    pub async fn send(
        &self,
        conversation_id: i64,
        sender_id: i64,
        body: &str,
    ) -> MessagingResult<ConversationMessage> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO conversation_messages (public_id, conversation_id, sender_id, body, read, created_at) VALUES (?, ?, ?, ?, false, ?)"
        )
        .bind(cuid2::create_id())
        .bind(conversation_id)
        .bind(sender_id)
        .bind(body)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        sqlx::query("UPDATE conversations SET updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(conversation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        let message_id = result.last_insert_rowid();
        let row = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM conversation_messages WHERE id = ?"
        ))
        .bind(message_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        Ok(Self::map_message(&row))
    }

    /// Mark everything the counterpart wrote as read
    pub async fn mark_read(&self, conversation_id: i64, reader_id: i64) -> MessagingResult<u32> {
        let result = sqlx::query(
            "UPDATE conversation_messages SET read = true WHERE conversation_id = ? AND sender_id != ? AND read = false"
        )
        .bind(conversation_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqliteConnectOptions;
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_conversations.db");
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await.unwrap();

        sqlx::query(
            r#"
            CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_id TEXT NOT NULL UNIQUE,
                display_name TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_id TEXT NOT NULL UNIQUE,
                seller_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE conversations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_id TEXT NOT NULL UNIQUE,
                product_id INTEGER NOT NULL,
                buyer_id INTEGER NOT NULL,
                seller_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (product_id, buyer_id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE conversation_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_id TEXT NOT NULL UNIQUE,
                conversation_id INTEGER NOT NULL,
                sender_id INTEGER NOT NULL,
                body TEXT NOT NULL,
                read BOOLEAN NOT NULL DEFAULT false,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        (pool, temp_dir)
    }

    async fn insert_user(pool: &SqlitePool, name: &str) -> i64 {
        let now = chrono::Utc::now().to_rfc3339();
        let result =
            sqlx::query("INSERT INTO users (public_id, display_name, created_at, updated_at) VALUES (?, ?, ?, ?)")
                .bind(cuid2::create_id())
                .bind(name)
                .bind(&now)
                .bind(&now)
                .execute(pool)
                .await
                .unwrap();
        result.last_insert_rowid()
    }

    async fn insert_product(pool: &SqlitePool, seller_id: i64, status: &str) -> String {
        let now = chrono::Utc::now().to_rfc3339();
        let public_id = cuid2::create_id();
        sqlx::query(
            "INSERT INTO products (public_id, seller_id, title, status, created_at, updated_at) VALUES (?, ?, 'Bike', ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(seller_id)
        .bind(status)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await
        .unwrap();
        public_id
    }

    #[tokio::test]
    async fn test_start_is_idempotent_per_buyer_and_product() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ConversationRepository::new(pool.clone());

        let seller = insert_user(&pool, "Seller").await;
        let buyer = insert_user(&pool, "Buyer").await;
        let product = insert_product(&pool, seller, "active").await;

        let first = repo.start(buyer, &product).await.unwrap();
        let second = repo.start(buyer, &product).await.unwrap();
        assert_eq!(first.id, second.id);

        let error = repo.start(seller, &product).await.unwrap_err();
        assert!(matches!(error, MessagingError::CannotMessageSelf));
    }

    #[tokio::test]
    async fn test_start_requires_active_listing_but_threads_survive_sale() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ConversationRepository::new(pool.clone());

        let seller = insert_user(&pool, "Seller").await;
        let buyer = insert_user(&pool, "Buyer").await;
        let pending = insert_product(&pool, seller, "pending").await;

        let error = repo.start(buyer, &pending).await.unwrap_err();
        assert!(matches!(error, MessagingError::ProductNotAvailable));

        let active = insert_product(&pool, seller, "active").await;
        let thread = repo.start(buyer, &active).await.unwrap();

        sqlx::query("UPDATE products SET status = 'sold' WHERE public_id = ?")
            .bind(&active)
            .execute(&pool)
            .await
            .unwrap();

        // the existing thread is still reachable and writable
        let again = repo.start(buyer, &active).await.unwrap();
        assert_eq!(again.id, thread.id);
        repo.send(thread.id, buyer, "still interested in pickup?").await.unwrap();
    }

    #[tokio::test]
    async fn test_messages_and_read_tracking() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ConversationRepository::new(pool.clone());

        let seller = insert_user(&pool, "Seller").await;
        let buyer = insert_user(&pool, "Buyer").await;
        let product = insert_product(&pool, seller, "active").await;
        let thread = repo.start(buyer, &product).await.unwrap();

        repo.send(thread.id, buyer, "Is the bike still available?").await.unwrap();
        repo.send(thread.id, seller, "Yes, until Friday.").await.unwrap();

        let messages = repo.messages(thread.id, 50, 0).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender_id, buyer);
        assert!(!messages[1].read);

        let marked = repo.mark_read(thread.id, buyer).await.unwrap();
        assert_eq!(marked, 1, "only the seller's message is new to the buyer");

        let messages = repo.messages(thread.id, 50, 0).await.unwrap();
        assert!(messages[1].read);
        assert!(!messages[0].read, "own messages are not self-read");
    }

    #[tokio::test]
    async fn test_participant_scoping() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ConversationRepository::new(pool.clone());

        let seller = insert_user(&pool, "Seller").await;
        let buyer = insert_user(&pool, "Buyer").await;
        let stranger = insert_user(&pool, "Stranger").await;
        let product = insert_product(&pool, seller, "active").await;
        let thread = repo.start(buyer, &product).await.unwrap();

        assert!(repo
            .find_for_participant(&thread.public_id, buyer)
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_for_participant(&thread.public_id, seller)
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_for_participant(&thread.public_id, stranger)
            .await
            .unwrap()
            .is_none());

        let summaries = repo.list_for_user(buyer).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].product_title, "Bike");
        assert!(repo.list_for_user(stranger).await.unwrap().is_empty());
    }
}
