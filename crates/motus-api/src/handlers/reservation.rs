//! Reservation handlers
//!
//! HTTP handlers for booking creation and cancellation.

use crate::dto::{ApiResponse, CancelRequest, ReservationRequest, ReservationResponse};
use actix_web::{web, HttpResponse};
use motus_core::AppError;
use motus_db::PgReservationRepository;
use motus_services::ReservationService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Build the reservation service from the shared pool
fn service(pool: &web::Data<PgPool>) -> ReservationService<PgReservationRepository> {
    ReservationService::new(Arc::new(PgReservationRepository::new(
        pool.get_ref().clone(),
    )))
}

/// Create a reservation
///
/// POST /api/reservation
#[instrument(skip(pool, req))]
pub async fn create_reservation(
    pool: web::Data<PgPool>,
    req: web::Json<ReservationRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Reservation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(
        departure = %req.departure_location,
        arrival = %req.arrival_location,
        "Creating reservation"
    );

    let reservation = service(&pool).create(req.into_inner().into()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(
        ReservationResponse::from(reservation),
        "reservation created",
    )))
}

/// Cancel a reservation
///
/// POST /api/reservation/{reservation_id}/cancel
#[instrument(skip(pool, req))]
pub async fn cancel_reservation(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    req: web::Json<CancelRequest>,
) -> Result<HttpResponse, AppError> {
    let reservation_id = path.into_inner();

    debug!("Canceling reservation {}", reservation_id);

    let reservation = service(&pool)
        .cancel(reservation_id, req.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        ReservationResponse::from(reservation),
        "reservation canceled",
    )))
}

/// Configure reservation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reservation")
            .route("", web::post().to(create_reservation))
            .route("/{reservation_id}/cancel", web::post().to(cancel_reservation)),
    );
}
