//! Conversation entity definitions

use serde::{Deserialize, Serialize};

/// A buyer/seller thread attached to a listing, at most one per
/// (product, buyer) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub public_id: String,
    pub product_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A conversation row joined with listing and participant display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: i64,
    pub public_id: String,
    pub product_public_id: String,
    pub product_title: String,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub buyer_name: Option<String>,
    pub seller_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A single message inside a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: i64,
    pub public_id: String,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub body: String,
    pub read: bool,
    pub created_at: String,
}
