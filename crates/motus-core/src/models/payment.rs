//! Stored billing key
//!
//! A billing key is an opaque token issued by the payment gateway that
//! represents a reusable payment-method authorization. We keep at most one
//! per user; charges and expiry always go through the gateway using the
//! stored token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored gateway billing key for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingKey {
    /// Unique identifier (assigned by the store)
    pub id: i64,

    /// Owning user identifier (from the auth token subject)
    pub user_id: String,

    /// Gateway-issued billing key token
    pub bid: String,

    /// Card product name reported by the gateway at registration
    pub card_name: Option<String>,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl BillingKey {
    /// Build a new billing key record for a user
    pub fn new(user_id: String, bid: String, card_name: Option<String>) -> Self {
        Self {
            id: 0,
            user_id,
            bid,
            card_name,
            created_at: Utc::now(),
        }
    }
}
