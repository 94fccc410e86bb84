//! Wire types for the payment provider's subscription-billing API
//!
//! All fields are camelCase on the wire. Business outcomes are carried in
//! `resultCode`/`resultMsg`; "0000" means accepted.

use serde::{Deserialize, Serialize};

/// Provider result code meaning the operation was accepted
pub const RESULT_ACCEPTED: &str = "0000";

/// Common accessor for provider replies carrying a result code/message
pub trait GatewayReply {
    /// Provider result code ("0000" = accepted)
    fn result_code(&self) -> &str;

    /// Provider result message
    fn result_msg(&self) -> &str;
}

// ==================== Requests ====================

/// Billing key registration request
///
/// POST /v1/subscribe/regist
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBillingKeyRequest {
    /// Card number (digits only)
    pub card_no: String,

    /// Card expiry year (two digits)
    pub exp_year: String,

    /// Card expiry month (two digits)
    pub exp_month: String,

    /// Card holder birth date or business number
    pub id_no: String,

    /// First two digits of the card password
    pub card_pw: String,

    /// Merchant order identifier for this registration
    pub order_id: String,
}

/// Charge request against a stored billing key
///
/// POST /v1/subscribe/{bid}/payments
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribePaymentRequest {
    /// Merchant order identifier for this charge
    pub order_id: String,

    /// Charge amount in integer currency units
    pub amount: i64,

    /// Product description shown on the statement
    pub goods_name: String,

    /// Installment months (0 = lump sum)
    pub card_quota: u8,
}

/// Billing key expiry request
///
/// POST /v1/subscribe/{bid}/expire
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpireRequest {
    /// Merchant order identifier for this expiry
    pub order_id: String,
}

// ==================== Responses ====================

/// Billing key registration result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingKeyResult {
    pub result_code: String,
    pub result_msg: String,

    /// Issued billing key token
    pub bid: Option<String>,

    /// Card issuer code
    pub card_code: Option<String>,

    /// Card product name
    pub card_name: Option<String>,

    pub order_id: Option<String>,
}

impl GatewayReply for BillingKeyResult {
    fn result_code(&self) -> &str {
        &self.result_code
    }

    fn result_msg(&self) -> &str {
        &self.result_msg
    }
}

/// Charge result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub result_code: String,
    pub result_msg: String,

    /// Provider transaction identifier
    pub tid: Option<String>,

    pub order_id: Option<String>,

    /// Approved amount in integer currency units
    pub amount: Option<i64>,

    /// Approval timestamp as reported by the provider
    pub paid_at: Option<String>,
}

impl GatewayReply for PaymentResult {
    fn result_code(&self) -> &str {
        &self.result_code
    }

    fn result_msg(&self) -> &str {
        &self.result_msg
    }
}

/// Billing key expiry result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpireResult {
    pub result_code: String,
    pub result_msg: String,

    /// Billing key that was expired
    pub bid: Option<String>,

    pub order_id: Option<String>,
}

impl GatewayReply for ExpireResult {
    fn result_code(&self) -> &str {
        &self.result_code
    }

    fn result_msg(&self) -> &str {
        &self.result_msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_wire_names() {
        let req = RegisterBillingKeyRequest {
            card_no: "1234567890123456".to_string(),
            exp_year: "27".to_string(),
            exp_month: "09".to_string(),
            id_no: "900101".to_string(),
            card_pw: "12".to_string(),
            order_id: "order-1".to_string(),
        };

        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"cardNo\""));
        assert!(json.contains("\"expYear\""));
        assert!(json.contains("\"orderId\""));
    }

    #[test]
    fn test_payment_result_parsing() {
        let body = r#"{
            "resultCode": "0000",
            "resultMsg": "approved",
            "tid": "TX0001",
            "orderId": "order-2",
            "amount": 15000,
            "paidAt": "2024-05-01T10:00:03+09:00"
        }"#;

        let result: PaymentResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.result_code, RESULT_ACCEPTED);
        assert_eq!(result.amount, Some(15000));
        assert_eq!(result.tid.as_deref(), Some("TX0001"));
    }

    #[test]
    fn test_decline_parsing() {
        let body = r#"{"resultCode": "3011", "resultMsg": "card limit exceeded"}"#;

        let result: PaymentResult = serde_json::from_str(body).unwrap();
        assert_ne!(result.result_code, RESULT_ACCEPTED);
        assert_eq!(result.result_msg, "card limit exceeded");
        assert!(result.tid.is_none());
    }
}
