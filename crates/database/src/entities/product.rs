//! Product entity definitions

use serde::{Deserialize, Serialize};

/// A marketplace listing.
///
/// Listings move through a moderated lifecycle: every new or edited listing
/// starts out `pending`, an administrator moves it to `active` or `rejected`,
/// and a completed checkout moves an active listing to the terminal `sold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub public_id: String,
    pub seller_id: i64,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub category: ProductCategory,
    pub condition: ProductCondition,
    pub status: ProductStatus,
    pub rejection_reason: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request for creating a new listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub category: ProductCategory,
    pub condition: ProductCondition,
    pub image_url: Option<String>,
}

/// Request for updating an existing listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<ProductCategory>,
    pub condition: Option<ProductCondition>,
    pub image_url: Option<String>,
}

/// Filters applied to the public browse query
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    pub search: Option<String>,
    pub max_price_cents: Option<i64>,
    pub limit: i64,
    pub offset: i64,
}

/// Product lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProductStatus {
    Pending,
    Active,
    Rejected,
    Sold,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Pending => "pending",
            ProductStatus::Active => "active",
            ProductStatus::Rejected => "rejected",
            ProductStatus::Sold => "sold",
        }
    }
}

impl From<&str> for ProductStatus {
    fn from(s: &str) -> Self {
        match s {
            "active" => ProductStatus::Active,
            "rejected" => ProductStatus::Rejected,
            "sold" => ProductStatus::Sold,
            _ => ProductStatus::Pending,
        }
    }
}

impl ToString for ProductStatus {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

/// Listing category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProductCategory {
    Textbook,
    Notes,
    Electronics,
    Tutoring,
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Textbook => "textbook",
            ProductCategory::Notes => "notes",
            ProductCategory::Electronics => "electronics",
            ProductCategory::Tutoring => "tutoring",
            ProductCategory::Other => "other",
        }
    }
}

impl From<&str> for ProductCategory {
    fn from(s: &str) -> Self {
        match s {
            "textbook" => ProductCategory::Textbook,
            "notes" => ProductCategory::Notes,
            "electronics" => ProductCategory::Electronics,
            "tutoring" => ProductCategory::Tutoring,
            _ => ProductCategory::Other,
        }
    }
}

impl ToString for ProductCategory {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

/// Physical condition of the item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProductCondition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl ProductCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCondition::New => "new",
            ProductCondition::LikeNew => "like_new",
            ProductCondition::Good => "good",
            ProductCondition::Fair => "fair",
            ProductCondition::Poor => "poor",
        }
    }
}

impl From<&str> for ProductCondition {
    fn from(s: &str) -> Self {
        match s {
            "new" => ProductCondition::New,
            "like_new" => ProductCondition::LikeNew,
            "fair" => ProductCondition::Fair,
            "poor" => ProductCondition::Poor,
            _ => ProductCondition::Good,
        }
    }
}

impl ToString for ProductCondition {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}
