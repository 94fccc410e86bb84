//! Companion tracking handlers
//!
//! HTTP handlers for listing and recording tracking entries.

use crate::dto::{AccompanyRequest, AccompanyResponse, ApiResponse};
use actix_web::{web, HttpResponse};
use motus_core::AppError;
use motus_db::PgAccompanyRepository;
use motus_services::AccompanyService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Build the accompany service from the shared pool
fn service(pool: &web::Data<PgPool>) -> AccompanyService<PgAccompanyRepository> {
    AccompanyService::new(Arc::new(PgAccompanyRepository::new(pool.get_ref().clone())))
}

/// List tracking entries for a reservation
///
/// GET /api/tracking/{reservation_id}
#[instrument(skip(pool))]
pub async fn get_tracking(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let reservation_id = path.into_inner();

    debug!("Listing tracking entries for reservation {}", reservation_id);

    let entries = service(&pool).list(reservation_id).await?;
    let data: Vec<AccompanyResponse> = entries.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data, "success")))
}

/// Record a tracking entry for a reservation
///
/// POST /api/tracking/{reservation_id}
#[instrument(skip(pool, req))]
pub async fn post_tracking(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    req: web::Json<AccompanyRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Tracking validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let reservation_id = path.into_inner();

    debug!("Recording tracking entry for reservation {}", reservation_id);

    let entry = service(&pool)
        .track(reservation_id, req.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(AccompanyResponse::from(entry), "success")))
}

/// Configure tracking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tracking")
            .route("/{reservation_id}", web::get().to(get_tracking))
            .route("/{reservation_id}", web::post().to(post_tracking)),
    );
}
