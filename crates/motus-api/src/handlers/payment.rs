//! Payment handlers
//!
//! HTTP handlers for billing-key lifecycle and charges. The caller is
//! resolved by the `AuthenticatedUser` extractor and passed into the
//! service as an explicit identity.

use crate::dto::{
    ApiResponse, BillingKeyRequest, BillingKeyResponse, ExpireBillingKeyRequest,
    ExpireBillingKeyResponse, PaymentRequest, PaymentResponse,
};
use actix_web::{web, HttpResponse};
use motus_auth::AuthenticatedUser;
use motus_core::AppError;
use motus_db::PgBillingKeyRepository;
use motus_gateway::PayClient;
use motus_services::PaymentService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Build the payment service from shared app data
fn service(
    pool: &web::Data<PgPool>,
    gateway: &web::Data<Arc<PayClient>>,
) -> PaymentService<PgBillingKeyRepository, PayClient> {
    PaymentService::new(
        Arc::new(PgBillingKeyRepository::new(pool.get_ref().clone())),
        gateway.get_ref().clone(),
    )
}

/// Register a payment method and issue a billing key
///
/// POST /api/payment/billing-key
#[instrument(skip(pool, gateway, user, req))]
pub async fn create_billing_key(
    pool: web::Data<PgPool>,
    gateway: web::Data<Arc<PayClient>>,
    user: AuthenticatedUser,
    req: web::Json<BillingKeyRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Billing key validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!("Issuing billing key for user {}", user.user_id);

    let key = service(&pool, &gateway)
        .create_billing_key(&user.user_id, req.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        BillingKeyResponse::from(key),
        "billing key issued",
    )))
}

/// Execute a charge against the stored billing key
///
/// POST /api/payment/payment
#[instrument(skip(pool, gateway, user, req))]
pub async fn request_payment(
    pool: web::Data<PgPool>,
    gateway: web::Data<Arc<PayClient>>,
    user: AuthenticatedUser,
    req: web::Json<PaymentRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Payment validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!("Requesting payment for user {}", user.user_id);

    let outcome = service(&pool, &gateway)
        .request_payment(&user.user_id, req.into_inner().into())
        .await?;

    // The envelope message carries the gateway's result message,
    // decline included.
    let message = outcome.result_msg.clone();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PaymentResponse::from(outcome), message)))
}

/// Expire the stored billing key
///
/// POST /api/payment/billing-key/expire
#[instrument(skip(pool, gateway, user, req))]
pub async fn expire_billing_key(
    pool: web::Data<PgPool>,
    gateway: web::Data<Arc<PayClient>>,
    user: AuthenticatedUser,
    req: web::Json<ExpireBillingKeyRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Expire request validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!("Expiring billing key for user {}", user.user_id);

    let result = service(&pool, &gateway)
        .expire_billing_key(&user.user_id, req.into_inner().into())
        .await?;

    let message = result.result_msg.clone();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        ExpireBillingKeyResponse::from(result),
        message,
    )))
}

/// Check whether the caller has a stored billing key
///
/// GET /api/payment/billing-key/exists
#[instrument(skip(pool, gateway, user))]
pub async fn billing_key_exists(
    pool: web::Data<PgPool>,
    gateway: web::Data<Arc<PayClient>>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let exists = service(&pool, &gateway)
        .billing_key_exists(&user.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(exists, "billing key existence retrieved")))
}

/// Configure payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payment")
            .route("/billing-key", web::post().to(create_billing_key))
            .route("/payment", web::post().to(request_payment))
            .route("/billing-key/expire", web::post().to(expire_billing_key))
            .route("/billing-key/exists", web::get().to(billing_key_exists)),
    );
}
