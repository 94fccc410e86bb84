//! Payment service
//!
//! Orchestrates billing-key lifecycle and charges against the payment
//! gateway on behalf of an authenticated user. The caller identity always
//! arrives as an explicit parameter.
//!
//! Provider declines and transport failures are kept apart: a declined
//! charge is still a well-formed outcome handed back to the caller, while
//! a transport failure (or a decline on a lifecycle operation, which has
//! no in-band result channel) becomes an error.

use motus_core::{
    models::BillingKey, traits::BillingKeyRepository, AppError, AppResult,
};
use motus_gateway::{
    client::GatewayError, BillingGateway, ExpireRequest, ExpireResult,
    RegisterBillingKeyRequest, SubscribePaymentRequest,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Input for registering a payment method
#[derive(Debug, Clone)]
pub struct RegisterCard {
    pub card_no: String,
    pub exp_year: String,
    pub exp_month: String,
    pub id_no: String,
    pub card_pw: String,
}

/// Input for executing a charge
#[derive(Debug, Clone)]
pub struct ChargeOrder {
    /// Amount in integer currency units
    pub amount: i64,
    /// Product description shown on the statement
    pub goods_name: String,
    /// Installment months (0 = lump sum)
    pub card_quota: u8,
}

/// Input for expiring a stored billing key
#[derive(Debug, Clone)]
pub struct ExpireBillingKey {
    /// Merchant order identifier for the expiry
    pub order_id: String,
}

/// Outcome of a charge
///
/// Carries the provider's result code and message even when the charge was
/// declined; the HTTP layer wraps both outcomes the same way.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub result_code: String,
    pub result_msg: String,
    pub order_id: String,
    pub amount: i64,
    pub tid: Option<String>,
    pub paid_at: Option<String>,
}

/// Map a gateway error into the application error space
fn map_gateway_error(e: GatewayError) -> AppError {
    match e {
        GatewayError::Declined { code, message } => AppError::GatewayDeclined { code, message },
        other => AppError::Gateway(other.to_string()),
    }
}

/// Payment service
pub struct PaymentService<B: BillingKeyRepository, G: BillingGateway> {
    billing_keys: Arc<B>,
    gateway: Arc<G>,
}

impl<B: BillingKeyRepository, G: BillingGateway> PaymentService<B, G> {
    /// Create a new payment service
    pub fn new(billing_keys: Arc<B>, gateway: Arc<G>) -> Self {
        Self {
            billing_keys,
            gateway,
        }
    }

    /// Register a payment method for a user and store the issued billing key
    ///
    /// Replaces any previously stored key for the user.
    #[instrument(skip(self, input))]
    pub async fn create_billing_key(
        &self,
        user_id: &str,
        input: RegisterCard,
    ) -> AppResult<BillingKey> {
        let order_id = Uuid::new_v4().to_string();

        let req = RegisterBillingKeyRequest {
            card_no: input.card_no,
            exp_year: input.exp_year,
            exp_month: input.exp_month,
            id_no: input.id_no,
            card_pw: input.card_pw,
            order_id,
        };

        let issued = self
            .gateway
            .register_billing_key(&req)
            .await
            .map_err(map_gateway_error)?;

        let bid = issued.bid.ok_or_else(|| {
            warn!("Gateway accepted registration without returning a billing key");
            AppError::Gateway("registration accepted without a billing key".to_string())
        })?;

        let key = BillingKey::new(user_id.to_string(), bid, issued.card_name);
        let stored = self.billing_keys.save(&key).await?;

        info!("Stored billing key for user {}", user_id);

        Ok(stored)
    }

    /// Execute a charge using the user's stored billing key
    ///
    /// A provider decline is returned as a normal outcome carrying the
    /// provider's code/message; only transport failures become errors.
    #[instrument(skip(self, input), fields(amount = input.amount))]
    pub async fn request_payment(
        &self,
        user_id: &str,
        input: ChargeOrder,
    ) -> AppResult<PaymentOutcome> {
        let key = self
            .billing_keys
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::BillingKeyNotFound(user_id.to_string()))?;

        let order_id = Uuid::new_v4().to_string();

        let req = SubscribePaymentRequest {
            order_id: order_id.clone(),
            amount: input.amount,
            goods_name: input.goods_name,
            card_quota: input.card_quota,
        };

        debug!("Charging order {} for user {}", order_id, user_id);

        match self.gateway.charge(&key.bid, &req).await {
            Ok(result) => {
                info!(
                    "Charge approved for user {}: order {}",
                    user_id, order_id
                );

                Ok(PaymentOutcome {
                    result_code: result.result_code,
                    result_msg: result.result_msg,
                    order_id: result.order_id.unwrap_or(order_id),
                    amount: result.amount.unwrap_or(req.amount),
                    tid: result.tid,
                    paid_at: result.paid_at,
                })
            }
            Err(GatewayError::Declined { code, message }) => {
                warn!(
                    "Charge declined for user {}: order {} [{}] {}",
                    user_id, order_id, code, message
                );

                Ok(PaymentOutcome {
                    result_code: code,
                    result_msg: message,
                    order_id,
                    amount: req.amount,
                    tid: None,
                    paid_at: None,
                })
            }
            Err(other) => Err(AppError::Gateway(other.to_string())),
        }
    }

    /// Expire the user's stored billing key at the gateway and forget it
    #[instrument(skip(self, input))]
    pub async fn expire_billing_key(
        &self,
        user_id: &str,
        input: ExpireBillingKey,
    ) -> AppResult<ExpireResult> {
        let key = self
            .billing_keys
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::BillingKeyNotFound(user_id.to_string()))?;

        let result = self
            .gateway
            .expire_billing_key(&key.bid, &ExpireRequest {
                order_id: input.order_id,
            })
            .await
            .map_err(map_gateway_error)?;

        self.billing_keys.delete_by_user(user_id).await?;

        info!("Expired billing key for user {}", user_id);

        Ok(result)
    }

    /// Check whether the user has a stored billing key
    ///
    /// No side effects; does not consult the gateway.
    #[instrument(skip(self))]
    pub async fn billing_key_exists(&self, user_id: &str) -> AppResult<bool> {
        self.billing_keys.exists(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_gateway::{BillingKeyResult, PaymentResult, RESULT_ACCEPTED};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory billing key store
    #[derive(Default)]
    struct InMemoryBillingKeys {
        rows: Mutex<HashMap<String, BillingKey>>,
    }

    #[async_trait::async_trait]
    impl BillingKeyRepository for InMemoryBillingKeys {
        async fn find_by_user(&self, user_id: &str) -> AppResult<Option<BillingKey>> {
            Ok(self.rows.lock().unwrap().get(user_id).cloned())
        }

        async fn save(&self, key: &BillingKey) -> AppResult<BillingKey> {
            let mut stored = key.clone();
            stored.id = 1;
            self.rows
                .lock()
                .unwrap()
                .insert(stored.user_id.clone(), stored.clone());
            Ok(stored)
        }

        async fn delete_by_user(&self, user_id: &str) -> AppResult<bool> {
            Ok(self.rows.lock().unwrap().remove(user_id).is_some())
        }

        async fn exists(&self, user_id: &str) -> AppResult<bool> {
            Ok(self.rows.lock().unwrap().contains_key(user_id))
        }
    }

    /// Scripted provider outcomes
    #[derive(Clone, Copy)]
    enum Mode {
        Accept,
        Decline,
        TransportFailure,
    }

    struct FakeGateway {
        mode: Mode,
    }

    impl FakeGateway {
        fn new(mode: Mode) -> Self {
            Self { mode }
        }

        fn declined() -> GatewayError {
            GatewayError::Declined {
                code: "3011".to_string(),
                message: "card limit exceeded".to_string(),
            }
        }
    }

    #[async_trait::async_trait]
    impl BillingGateway for FakeGateway {
        async fn register_billing_key(
            &self,
            req: &RegisterBillingKeyRequest,
        ) -> Result<BillingKeyResult, GatewayError> {
            match self.mode {
                Mode::Accept => Ok(BillingKeyResult {
                    result_code: RESULT_ACCEPTED.to_string(),
                    result_msg: "registered".to_string(),
                    bid: Some("BIKY00000001".to_string()),
                    card_code: Some("04".to_string()),
                    card_name: Some("Example Card".to_string()),
                    order_id: Some(req.order_id.clone()),
                }),
                Mode::Decline => Err(Self::declined()),
                Mode::TransportFailure => {
                    Err(GatewayError::Connection("connection refused".to_string()))
                }
            }
        }

        async fn charge(
            &self,
            _bid: &str,
            req: &SubscribePaymentRequest,
        ) -> Result<PaymentResult, GatewayError> {
            match self.mode {
                Mode::Accept => Ok(PaymentResult {
                    result_code: RESULT_ACCEPTED.to_string(),
                    result_msg: "approved".to_string(),
                    tid: Some("TX0001".to_string()),
                    order_id: Some(req.order_id.clone()),
                    amount: Some(req.amount),
                    paid_at: Some("2024-05-01T10:00:03+09:00".to_string()),
                }),
                Mode::Decline => Err(Self::declined()),
                Mode::TransportFailure => {
                    Err(GatewayError::Timeout(5000))
                }
            }
        }

        async fn expire_billing_key(
            &self,
            bid: &str,
            req: &ExpireRequest,
        ) -> Result<ExpireResult, GatewayError> {
            match self.mode {
                Mode::Accept => Ok(ExpireResult {
                    result_code: RESULT_ACCEPTED.to_string(),
                    result_msg: "expired".to_string(),
                    bid: Some(bid.to_string()),
                    order_id: Some(req.order_id.clone()),
                }),
                Mode::Decline => Err(Self::declined()),
                Mode::TransportFailure => {
                    Err(GatewayError::Http(503))
                }
            }
        }
    }

    fn service(mode: Mode) -> PaymentService<InMemoryBillingKeys, FakeGateway> {
        PaymentService::new(
            Arc::new(InMemoryBillingKeys::default()),
            Arc::new(FakeGateway::new(mode)),
        )
    }

    fn card() -> RegisterCard {
        RegisterCard {
            card_no: "1234567890123456".to_string(),
            exp_year: "27".to_string(),
            exp_month: "09".to_string(),
            id_no: "900101".to_string(),
            card_pw: "12".to_string(),
        }
    }

    fn order() -> ChargeOrder {
        ChargeOrder {
            amount: 15000,
            goods_name: "Hospital escort ride".to_string(),
            card_quota: 0,
        }
    }

    #[tokio::test]
    async fn test_billing_key_exists_lifecycle() {
        let svc = service(Mode::Accept);

        assert!(!svc.billing_key_exists("rider-1").await.unwrap());

        let stored = svc.create_billing_key("rider-1", card()).await.unwrap();
        assert_eq!(stored.bid, "BIKY00000001");
        assert_eq!(stored.card_name.as_deref(), Some("Example Card"));

        assert!(svc.billing_key_exists("rider-1").await.unwrap());
        assert!(!svc.billing_key_exists("rider-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_billing_key_decline_is_error() {
        let svc = service(Mode::Decline);

        let result = svc.create_billing_key("rider-1", card()).await;
        assert!(matches!(result, Err(AppError::GatewayDeclined { .. })));
        assert!(!svc.billing_key_exists("rider-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_charge_without_billing_key() {
        let svc = service(Mode::Accept);

        let result = svc.request_payment("rider-1", order()).await;
        assert!(matches!(result, Err(AppError::BillingKeyNotFound(_))));
    }

    #[tokio::test]
    async fn test_charge_approved() {
        let svc = service(Mode::Accept);
        svc.create_billing_key("rider-1", card()).await.unwrap();

        let outcome = svc.request_payment("rider-1", order()).await.unwrap();

        assert_eq!(outcome.result_code, RESULT_ACCEPTED);
        assert_eq!(outcome.result_msg, "approved");
        assert_eq!(outcome.amount, 15000);
        assert_eq!(outcome.tid.as_deref(), Some("TX0001"));
    }

    #[tokio::test]
    async fn test_charge_decline_is_an_outcome_not_an_error() {
        let accept = service(Mode::Accept);
        accept.create_billing_key("rider-1", card()).await.unwrap();

        // Same store, declining gateway
        let decline = PaymentService::new(
            accept.billing_keys.clone(),
            Arc::new(FakeGateway::new(Mode::Decline)),
        );

        let outcome = decline.request_payment("rider-1", order()).await.unwrap();

        assert_eq!(outcome.result_code, "3011");
        assert_eq!(outcome.result_msg, "card limit exceeded");
        assert_eq!(outcome.amount, 15000);
        assert!(outcome.tid.is_none());
    }

    #[tokio::test]
    async fn test_charge_transport_failure_is_an_error() {
        let accept = service(Mode::Accept);
        accept.create_billing_key("rider-1", card()).await.unwrap();

        let broken = PaymentService::new(
            accept.billing_keys.clone(),
            Arc::new(FakeGateway::new(Mode::TransportFailure)),
        );

        let result = broken.request_payment("rider-1", order()).await;
        assert!(matches!(result, Err(AppError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_expire_removes_stored_key() {
        let svc = service(Mode::Accept);
        svc.create_billing_key("rider-1", card()).await.unwrap();

        let result = svc
            .expire_billing_key(
                "rider-1",
                ExpireBillingKey {
                    order_id: "expire-1".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.bid.as_deref(), Some("BIKY00000001"));
        assert!(!svc.billing_key_exists("rider-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_expire_without_billing_key() {
        let svc = service(Mode::Accept);

        let result = svc
            .expire_billing_key(
                "rider-1",
                ExpireBillingKey {
                    order_id: "expire-1".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BillingKeyNotFound(_))));
    }
}
