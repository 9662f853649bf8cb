//! Product repository covering the moderated listing lifecycle.

use crate::entities::product::{ProductCategory, ProductCondition, ProductStatus};
use crate::entities::{CreateProductRequest, Product, ProductFilter, UpdateProductRequest};
use crate::types::{ProductError, ProductResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const PRODUCT_COLUMNS: &str = "id, public_id, seller_id, title, description, price_cents, category, condition, status, rejection_reason, image_url, created_at, updated_at";

/// Repository for product database operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Product {
        Product {
            id: row.get("id"),
            public_id: row.get("public_id"),
            seller_id: row.get("seller_id"),
            title: row.get("title"),
            description: row.get("description"),
            price_cents: row.get("price_cents"),
            category: ProductCategory::from(row.get::<String, _>("category").as_str()),
            condition: ProductCondition::from(row.get::<String, _>("condition").as_str()),
            status: ProductStatus::from(row.get::<String, _>("status").as_str()),
            rejection_reason: row.get("rejection_reason"),
            image_url: row.get("image_url"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// Create a new listing. Every listing starts out pending moderation.
    pub async fn create(
        &self,
        seller_id: i64,
        request: &CreateProductRequest,
    ) -> ProductResult<Product> {
        let now = Utc::now().to_rfc3339();
        let public_id = cuid2::create_id();

        let result = sqlx::query(
            "INSERT INTO products (public_id, seller_id, title, description, price_cents, category, condition, status, created_at, updated_at, image_url) VALUES (?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?, ?)"
        )
        .bind(&public_id)
        .bind(seller_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.price_cents)
        .bind(request.category.to_string())
        .bind(request.condition.to_string())
        .bind(&now)
        .bind(&now)
        .bind(&request.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        let product_id = result.last_insert_rowid();
        self.find_by_id(product_id)
            .await?
            .ok_or_else(|| ProductError::DatabaseError("failed to retrieve created listing".to_string()))
    }

    /// Find product by ID
    pub async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Find product by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> ProductResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Public browse query. Only active listings are ever returned here,
    /// whatever filters the caller supplies.
    pub async fn list_active(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let mut sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE status = 'active'");

        if filter.category.is_some() {
            sql.push_str(" AND category = ?");
        }
        if filter.search.is_some() {
            sql.push_str(" AND (title LIKE ? OR description LIKE ?)");
        }
        if filter.max_price_cents.is_some() {
            sql.push_str(" AND price_cents <= ?");
        }
        sql.push_str(" ORDER BY created_at DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query(&sql);
        if let Some(category) = filter.category {
            query = query.bind(category.to_string());
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", search);
            query = query.bind(pattern.clone()).bind(pattern);
        }
        if let Some(max_price) = filter.max_price_cents {
            query = query.bind(max_price);
        }
        query = query.bind(filter.limit).bind(filter.offset);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// All listings owned by a seller, every status included
    pub async fn list_by_seller(&self, seller_id: i64) -> ProductResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE seller_id = ? ORDER BY created_at DESC"
        ))
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Admin listing filtered by lifecycle status
    pub async fn list_by_status(
        &self,
        status: ProductStatus,
        limit: i64,
        offset: i64,
    ) -> ProductResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE status = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(status.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Count of listings awaiting moderation
    pub async fn count_pending(&self) -> ProductResult<i64> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(count.unwrap_or(0))
    }

    /// Edit a listing. Only the seller may edit, sold listings are frozen,
    /// and any edit sends the listing back through moderation.
    pub async fn update_listing(
        &self,
        seller_id: i64,
        public_id: &str,
        request: &UpdateProductRequest,
    ) -> ProductResult<Product> {
        let product = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(ProductError::ProductNotFound)?;

        if product.seller_id != seller_id {
            return Err(ProductError::NotOwner);
        }
        if product.status == ProductStatus::Sold {
            return Err(ProductError::AlreadySold);
        }

        let now = Utc::now().to_rfc3339();

        let mut query_parts = Vec::new();
        let mut values = Vec::new();

        if let Some(ref title) = request.title {
            query_parts.push("title = ?");
            values.push(title.clone());
        }
        if let Some(ref description) = request.description {
            query_parts.push("description = ?");
            values.push(description.clone());
        }
        if let Some(category) = request.category {
            query_parts.push("category = ?");
            values.push(category.to_string());
        }
        if let Some(condition) = request.condition {
            query_parts.push("condition = ?");
            values.push(condition.to_string());
        }
        if let Some(ref image_url) = request.image_url {
            query_parts.push("image_url = ?");
            values.push(image_url.clone());
        }

        if query_parts.is_empty() && request.price_cents.is_none() {
            return Ok(product);
        }

        // every edit re-enters moderation
        query_parts.push("status = 'pending'");
        query_parts.push("rejection_reason = NULL");
        query_parts.push("updated_at = ?");
        values.push(now);

        let set_clause = query_parts.join(", ");
        let query_str = if request.price_cents.is_some() {
            format!("UPDATE products SET price_cents = ?, {} WHERE id = ?", set_clause)
        } else {
            format!("UPDATE products SET {} WHERE id = ?", set_clause)
        };

        let mut query = sqlx::query(&query_str);
        if let Some(price_cents) = request.price_cents {
            query = query.bind(price_cents);
        }
        for value in values {
            query = query.bind(value);
        }
        query = query.bind(product.id);

        query
            .execute(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        self.find_by_id(product.id)
            .await?
            .ok_or(ProductError::ProductNotFound)
    }

    /// Remove a listing. Sold listings are kept for order history.
    pub async fn delete_listing(&self, seller_id: i64, public_id: &str) -> ProductResult<()> {
        let product = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(ProductError::ProductNotFound)?;

        if product.seller_id != seller_id {
            return Err(ProductError::NotOwner);
        }
        if product.status == ProductStatus::Sold {
            return Err(ProductError::AlreadySold);
        }

        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(product.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Seller marks an active listing as sold outside checkout, e.g. a cash
    /// sale arranged in a conversation. The transition is guarded so a racing
    /// checkout cannot sell the same item twice.
    pub async fn mark_sold(&self, seller_id: i64, public_id: &str) -> ProductResult<Product> {
        let product = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(ProductError::ProductNotFound)?;

        if product.seller_id != seller_id {
            return Err(ProductError::NotOwner);
        }

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE products SET status = 'sold', updated_at = ? WHERE id = ? AND status = 'active'",
        )
        .bind(&now)
        .bind(product.id)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return match product.status {
                ProductStatus::Sold => Err(ProductError::AlreadySold),
                _ => Err(ProductError::NotActive),
            };
        }

        self.find_by_id(product.id)
            .await?
            .ok_or(ProductError::ProductNotFound)
    }

    /// Approve a pending listing, making it publicly visible.
    pub async fn approve(&self, public_id: &str) -> ProductResult<Product> {
        let product = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(ProductError::ProductNotFound)?;

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE products SET status = 'active', rejection_reason = NULL, updated_at = ? WHERE id = ? AND status = 'pending'"
        )
        .bind(&now)
        .bind(product.id)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotPending);
        }

        self.find_by_id(product.id)
            .await?
            .ok_or(ProductError::ProductNotFound)
    }

    /// Reject a pending listing. The reason is mandatory and is stored for
    /// the seller to read.
    pub async fn reject(&self, public_id: &str, reason: &str) -> ProductResult<Product> {
        if reason.trim().is_empty() {
            return Err(ProductError::ReasonRequired);
        }

        let product = self
            .find_by_public_id(public_id)
            .await?
            .ok_or(ProductError::ProductNotFound)?;

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE products SET status = 'rejected', rejection_reason = ?, updated_at = ? WHERE id = ? AND status = 'pending'"
        )
        .bind(reason)
        .bind(&now)
        .bind(product.id)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotPending);
        }

        self.find_by_id(product.id)
            .await?
            .ok_or(ProductError::ProductNotFound)
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
        let db_path = temp_dir.path().join("test_products.db");
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await.unwrap();

        sqlx::query(
            r#"
            CREATE TABLE products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_id TEXT NOT NULL UNIQUE,
                seller_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                price_cents INTEGER NOT NULL,
                category TEXT NOT NULL DEFAULT 'other',
                condition TEXT NOT NULL DEFAULT 'good',
                status TEXT NOT NULL DEFAULT 'pending',
                rejection_reason TEXT,
                image_url TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        (pool, temp_dir)
    }

    fn textbook_request() -> CreateProductRequest {
        CreateProductRequest {
            title: "Linear Algebra, 4th ed.".to_string(),
            description: "Barely used, no highlights".to_string(),
            price_cents: 2500,
            category: ProductCategory::Textbook,
            condition: ProductCondition::LikeNew,
            image_url: None,
        }
    }

    fn default_filter() -> ProductFilter {
        ProductFilter {
            limit: 20,
            offset: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_new_listing_starts_pending_and_stays_out_of_browse() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ProductRepository::new(pool);

        let product = repo.create(1, &textbook_request()).await.unwrap();
        assert_eq!(product.status, ProductStatus::Pending);

        let browse = repo.list_active(&default_filter()).await.unwrap();
        assert!(browse.is_empty(), "pending listings must never be browsable");

        let mine = repo.list_by_seller(1).await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_approve_moves_listing_into_browse() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ProductRepository::new(pool);

        let product = repo.create(1, &textbook_request()).await.unwrap();
        let approved = repo.approve(&product.public_id).await.unwrap();
        assert_eq!(approved.status, ProductStatus::Active);

        let browse = repo.list_active(&default_filter()).await.unwrap();
        assert_eq!(browse.len(), 1);
        assert_eq!(browse[0].public_id, product.public_id);

        // a second approval hits the status guard
        let error = repo.approve(&product.public_id).await.unwrap_err();
        assert!(matches!(error, ProductError::NotPending));
    }

    #[tokio::test]
    async fn test_reject_requires_reason_and_pending_status() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ProductRepository::new(pool);

        let product = repo.create(1, &textbook_request()).await.unwrap();

        let error = repo.reject(&product.public_id, "   ").await.unwrap_err();
        assert!(matches!(error, ProductError::ReasonRequired));

        let rejected = repo
            .reject(&product.public_id, "stock photo instead of the item")
            .await
            .unwrap();
        assert_eq!(rejected.status, ProductStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason,
            Some("stock photo instead of the item".to_string())
        );

        let error = repo.reject(&product.public_id, "again").await.unwrap_err();
        assert!(matches!(error, ProductError::NotPending));
    }

    #[tokio::test]
    async fn test_sold_is_terminal() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ProductRepository::new(pool);

        let product = repo.create(1, &textbook_request()).await.unwrap();
        repo.approve(&product.public_id).await.unwrap();

        let sold = repo.mark_sold(1, &product.public_id).await.unwrap();
        assert_eq!(sold.status, ProductStatus::Sold);

        // no edits, re-reviews or second sales once sold
        let error = repo.mark_sold(1, &product.public_id).await.unwrap_err();
        assert!(matches!(error, ProductError::AlreadySold));
        let error = repo.approve(&product.public_id).await.unwrap_err();
        assert!(matches!(error, ProductError::NotPending));
        let error = repo
            .update_listing(1, &product.public_id, &UpdateProductRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(error, ProductError::AlreadySold));
        let error = repo.delete_listing(1, &product.public_id).await.unwrap_err();
        assert!(matches!(error, ProductError::AlreadySold));
    }

    #[tokio::test]
    async fn test_mark_sold_requires_active_listing_and_owner() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ProductRepository::new(pool);

        let product = repo.create(1, &textbook_request()).await.unwrap();

        let error = repo.mark_sold(2, &product.public_id).await.unwrap_err();
        assert!(matches!(error, ProductError::NotOwner));

        // still pending, so not sellable yet
        let error = repo.mark_sold(1, &product.public_id).await.unwrap_err();
        assert!(matches!(error, ProductError::NotActive));
    }

    #[tokio::test]
    async fn test_edit_resets_listing_to_pending() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ProductRepository::new(pool);

        let product = repo.create(1, &textbook_request()).await.unwrap();
        repo.approve(&product.public_id).await.unwrap();

        let updated = repo
            .update_listing(
                1,
                &product.public_id,
                &UpdateProductRequest {
                    price_cents: Some(1800),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 1800);
        assert_eq!(
            updated.status,
            ProductStatus::Pending,
            "edited listings must be re-moderated"
        );
        assert!(repo.list_active(&default_filter()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_browse_filters() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ProductRepository::new(pool);

        let book = repo.create(1, &textbook_request()).await.unwrap();
        let mut lamp = textbook_request();
        lamp.title = "Desk lamp".to_string();
        lamp.category = ProductCategory::Electronics;
        lamp.price_cents = 900;
        let lamp = repo.create(2, &lamp).await.unwrap();

        repo.approve(&book.public_id).await.unwrap();
        repo.approve(&lamp.public_id).await.unwrap();

        let mut filter = default_filter();
        filter.category = Some(ProductCategory::Electronics);
        let hits = repo.list_active(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Desk lamp");

        let mut filter = default_filter();
        filter.search = Some("algebra".to_string());
        let hits = repo.list_active(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].public_id, book.public_id);

        let mut filter = default_filter();
        filter.max_price_cents = Some(1000);
        let hits = repo.list_active(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].public_id, lamp.public_id);
    }

    #[tokio::test]
    async fn test_admin_status_listing_and_pending_count() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ProductRepository::new(pool);

        let first = repo.create(1, &textbook_request()).await.unwrap();
        let _second = repo.create(2, &textbook_request()).await.unwrap();
        repo.approve(&first.public_id).await.unwrap();

        assert_eq!(repo.count_pending().await.unwrap(), 1);

        let pending = repo.list_by_status(ProductStatus::Pending, 50, 0).await.unwrap();
        assert_eq!(pending.len(), 1);
        let active = repo.list_by_status(ProductStatus::Active, 50, 0).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].public_id, first.public_id);
    }
}
