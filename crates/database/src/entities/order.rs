//! Order entity definitions

use serde::{Deserialize, Serialize};

/// A completed checkout. The price is copied from the listing at purchase
/// time so later edits never rewrite order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub public_id: String,
    pub product_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub amount_cents: i64,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrderStatus {
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Completed,
        }
    }
}

impl ToString for OrderStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}
