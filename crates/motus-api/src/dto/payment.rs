//! Payment DTOs

use chrono::{DateTime, Utc};
use motus_core::models::BillingKey;
use motus_gateway::ExpireResult;
use motus_services::{ChargeOrder, ExpireBillingKey, PaymentOutcome, RegisterCard};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Billing key registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillingKeyRequest {
    /// Card number (digits only)
    #[validate(length(min = 14, max = 16))]
    pub card_no: String,

    /// Expiry year, two digits
    #[validate(length(equal = 2))]
    pub exp_year: String,

    /// Expiry month, two digits
    #[validate(length(equal = 2))]
    pub exp_month: String,

    /// Card holder birth date or business number
    #[validate(length(min = 6, max = 10))]
    pub id_no: String,

    /// First two digits of the card password
    #[validate(length(equal = 2))]
    pub card_pw: String,
}

impl From<BillingKeyRequest> for RegisterCard {
    fn from(req: BillingKeyRequest) -> Self {
        Self {
            card_no: req.card_no,
            exp_year: req.exp_year,
            exp_month: req.exp_month,
            id_no: req.id_no,
            card_pw: req.card_pw,
        }
    }
}

/// Billing key registration response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingKeyResponse {
    /// Gateway-issued billing key token
    pub bid: String,

    /// Card product name reported by the gateway
    pub card_name: Option<String>,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl From<BillingKey> for BillingKeyResponse {
    fn from(key: BillingKey) -> Self {
        Self {
            bid: key.bid,
            card_name: key.card_name,
            created_at: key.created_at,
        }
    }
}

/// Charge request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount in integer currency units
    #[validate(range(min = 1))]
    pub amount: i64,

    /// Product description shown on the statement
    #[validate(length(min = 1))]
    pub goods_name: String,

    /// Installment months (0 = lump sum)
    #[serde(default)]
    pub card_quota: u8,
}

impl From<PaymentRequest> for ChargeOrder {
    fn from(req: PaymentRequest) -> Self {
        Self {
            amount: req.amount,
            goods_name: req.goods_name,
            card_quota: req.card_quota,
        }
    }
}

/// Charge response
///
/// Carries the gateway result even for a decline; callers inspect
/// `resultCode`/`resultMsg` for the business outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub result_code: String,
    pub result_msg: String,
    pub order_id: String,
    pub amount: i64,
    pub tid: Option<String>,
    pub paid_at: Option<String>,
}

impl From<PaymentOutcome> for PaymentResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        Self {
            result_code: outcome.result_code,
            result_msg: outcome.result_msg,
            order_id: outcome.order_id,
            amount: outcome.amount,
            tid: outcome.tid,
            paid_at: outcome.paid_at,
        }
    }
}

/// Billing key expiry request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpireBillingKeyRequest {
    /// Merchant order identifier for the expiry
    #[validate(length(min = 1))]
    pub order_id: String,
}

impl From<ExpireBillingKeyRequest> for ExpireBillingKey {
    fn from(req: ExpireBillingKeyRequest) -> Self {
        Self {
            order_id: req.order_id,
        }
    }
}

/// Billing key expiry response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpireBillingKeyResponse {
    pub result_code: String,
    pub result_msg: String,
    pub bid: Option<String>,
    pub order_id: Option<String>,
}

impl From<ExpireResult> for ExpireBillingKeyResponse {
    fn from(result: ExpireResult) -> Self {
        Self {
            result_code: result.result_code,
            result_msg: result.result_msg,
            bid: result.bid,
            order_id: result.order_id,
        }
    }
}
