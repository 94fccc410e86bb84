//! Payment gateway integration
//!
//! HTTP client for the payment provider's subscription-billing API:
//! billing key registration, charges against a stored billing key, and
//! billing key expiry. The provider reports business outcomes through a
//! `resultCode` field in an HTTP-200 body; this crate separates those
//! declines from transport-level failures so callers can treat them
//! differently.

pub mod client;
pub mod types;

pub use client::{BillingGateway, GatewayError, PayClient};
pub use types::{
    BillingKeyResult, ExpireRequest, ExpireResult, PaymentResult, RegisterBillingKeyRequest,
    SubscribePaymentRequest, RESULT_ACCEPTED,
};
