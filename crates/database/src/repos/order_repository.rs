//! Order repository covering checkout and purchase history.

use crate::entities::order::OrderStatus;
use crate::entities::Order;
use crate::types::{OrderError, OrderResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const ORDER_COLUMNS: &str =
    "id, public_id, product_id, buyer_id, seller_id, amount_cents, status, created_at, updated_at";

/// Repository for order database operations
#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Order {
        Order {
            id: row.get("id"),
            public_id: row.get("public_id"),
            product_id: row.get("product_id"),
            buyer_id: row.get("buyer_id"),
            seller_id: row.get("seller_id"),
            amount_cents: row.get("amount_cents"),
            status: OrderStatus::from(row.get::<String, _>("status").as_str()),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// Buy an active listing. The product flips to its terminal sold state
    /// and the order is written in one transaction; the status guard on the
    /// update means two concurrent checkouts cannot both succeed.
    pub async fn checkout(&self, buyer_id: i64, product_public_id: &str) -> OrderResult<Order> {
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        let product = sqlx::query(
            "SELECT id, seller_id, price_cents, status FROM products WHERE public_id = ?",
        )
        .bind(product_public_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?
        .ok_or(OrderError::ProductNotFound)?;

        let product_id: i64 = product.get("id");
        let seller_id: i64 = product.get("seller_id");
        let price_cents: i64 = product.get("price_cents");

        if seller_id == buyer_id {
            return Err(OrderError::CannotBuyOwnListing);
        }

        let result = sqlx::query(
            "UPDATE products SET status = 'sold', updated_at = ? WHERE id = ? AND status = 'active'",
        )
        .bind(&now)
        .bind(product_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(OrderError::ProductNotAvailable);
        }

        let public_id = cuid2::create_id();
        let insert = sqlx::query(
            "INSERT INTO orders (public_id, product_id, buyer_id, seller_id, amount_cents, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 'completed', ?, ?)"
        )
        .bind(&public_id)
        .bind(product_id)
        .bind(buyer_id)
        .bind(seller_id)
        .bind(price_cents)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        let order_id = insert.last_insert_rowid();
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
            .bind(order_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        Ok(Self::map_row(&row))
    }

    /// Find order by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> OrderResult<Option<Order>> {
        let row = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Purchases made by a buyer, newest first
    pub async fn list_by_buyer(&self, buyer_id: i64) -> OrderResult<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE buyer_id = ? ORDER BY created_at DESC"
        ))
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Sales made by a seller, newest first
    pub async fn list_by_seller(&self, seller_id: i64) -> OrderResult<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE seller_id = ? ORDER BY created_at DESC"
        ))
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }
}
