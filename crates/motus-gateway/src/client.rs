//! HTTP client for the payment provider
//!
//! Low-level communication with the provider's REST API. Credentials are
//! sent as HTTP Basic auth built from the merchant client/secret key pair.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::types::{
    BillingKeyResult, ExpireRequest, ExpireResult, GatewayReply, PaymentResult,
    RegisterBillingKeyRequest, SubscribePaymentRequest, RESULT_ACCEPTED,
};

/// Default request timeout in milliseconds
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Errors from the payment gateway client
///
/// `Declined` is a business outcome reported by the provider; every other
/// variant is a transport- or integration-level failure.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout: request took longer than {0}ms")]
    Timeout(u64),

    #[error("HTTP error: status {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Declined [{code}]: {message}")]
    Declined { code: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Gateway abstraction used by the payment service
///
/// Implemented by `PayClient`; services stay generic over this trait so
/// tests can substitute a fake provider.
#[async_trait]
pub trait BillingGateway: Send + Sync {
    /// Register a payment method and issue a billing key
    async fn register_billing_key(
        &self,
        req: &RegisterBillingKeyRequest,
    ) -> Result<BillingKeyResult, GatewayError>;

    /// Execute a charge against a stored billing key
    async fn charge(
        &self,
        bid: &str,
        req: &SubscribePaymentRequest,
    ) -> Result<PaymentResult, GatewayError>;

    /// Expire (revoke) a stored billing key
    async fn expire_billing_key(
        &self,
        bid: &str,
        req: &ExpireRequest,
    ) -> Result<ExpireResult, GatewayError>;
}

/// Payment provider client
pub struct PayClient {
    http_client: Client,
    base_url: String,
    client_key: String,
    secret_key: String,
    timeout_ms: u64,
}

impl PayClient {
    /// Create a new gateway client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Provider API root (e.g. "https://api.pay.example.com")
    /// * `client_key` - Merchant client key
    /// * `secret_key` - Merchant secret key
    /// * `timeout_ms` - Request timeout in milliseconds
    pub fn new(
        base_url: &str,
        client_key: &str,
        secret_key: &str,
        timeout_ms: u64,
    ) -> Result<Self, GatewayError> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_key: client_key.to_string(),
            secret_key: secret_key.to_string(),
            timeout_ms,
        })
    }

    /// Create a client from environment variables
    ///
    /// Expects:
    /// - GATEWAY_URL
    /// - GATEWAY_CLIENT_KEY
    /// - GATEWAY_SECRET_KEY
    /// - GATEWAY_TIMEOUT_MS (optional)
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url = std::env::var("GATEWAY_URL")
            .map_err(|_| GatewayError::Config("GATEWAY_URL not set".to_string()))?;

        let client_key = std::env::var("GATEWAY_CLIENT_KEY")
            .map_err(|_| GatewayError::Config("GATEWAY_CLIENT_KEY not set".to_string()))?;

        let secret_key = std::env::var("GATEWAY_SECRET_KEY")
            .map_err(|_| GatewayError::Config("GATEWAY_SECRET_KEY not set".to_string()))?;

        let timeout_ms: u64 = std::env::var("GATEWAY_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|_| GatewayError::Config("Invalid GATEWAY_TIMEOUT_MS".to_string()))?;

        Self::new(&base_url, &client_key, &secret_key, timeout_ms)
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a POST against the provider API
    #[instrument(skip(self, body), fields(path = %path))]
    async fn post<T, R>(&self, path: &str, body: &T) -> Result<R, GatewayError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        debug!("Gateway request: POST {}", path);

        let timeout_ms = self.timeout_ms;
        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.client_key, Some(&self.secret_key))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(timeout_ms)
                } else {
                    GatewayError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Gateway HTTP error: status={}", status);
            return Err(GatewayError::Http(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Parse(format!("Failed to read response body: {}", e)))?;

        debug!("Gateway response: {}", text);

        serde_json::from_str(&text)
            .map_err(|e| GatewayError::Parse(format!("Failed to parse JSON: {} - Body: {}", e, text)))
    }

    /// Map a provider reply into a decline error when it was not accepted
    fn accepted<R: GatewayReply>(reply: R) -> Result<R, GatewayError> {
        if reply.result_code() == RESULT_ACCEPTED {
            Ok(reply)
        } else {
            Err(GatewayError::Declined {
                code: reply.result_code().to_string(),
                message: reply.result_msg().to_string(),
            })
        }
    }
}

#[async_trait]
impl BillingGateway for PayClient {
    #[instrument(skip(self, req))]
    async fn register_billing_key(
        &self,
        req: &RegisterBillingKeyRequest,
    ) -> Result<BillingKeyResult, GatewayError> {
        let reply: BillingKeyResult = self.post("/v1/subscribe/regist", req).await?;
        Self::accepted(reply)
    }

    #[instrument(skip(self, req), fields(order_id = %req.order_id))]
    async fn charge(
        &self,
        bid: &str,
        req: &SubscribePaymentRequest,
    ) -> Result<PaymentResult, GatewayError> {
        let reply: PaymentResult = self
            .post(&format!("/v1/subscribe/{}/payments", bid), req)
            .await?;
        Self::accepted(reply)
    }

    #[instrument(skip(self, req))]
    async fn expire_billing_key(
        &self,
        bid: &str,
        req: &ExpireRequest,
    ) -> Result<ExpireResult, GatewayError> {
        let reply: ExpireResult = self
            .post(&format!("/v1/subscribe/{}/expire", bid), req)
            .await?;
        Self::accepted(reply)
    }
}
