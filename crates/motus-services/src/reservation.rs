//! Reservation service
//!
//! Validates and creates bookings; validates and applies cancellations.

use chrono::Utc;
use motus_core::{
    models::{parse_datetime, CancelReason, Reservation},
    traits::ReservationRepository,
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Client-facing message for a booking request that fails to parse.
/// Long predates this service and names the wrong field; the mobile app
/// matches on it, so it stays as-is.
const BOOKING_PARSE_MESSAGE: &str = "guardian phone number must be provided";

/// Input for creating a reservation
///
/// Date-time and price arrive as strings on the wire and are parsed here.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub departure_location: String,
    pub arrival_location: String,
    /// "yyyy-MM-dd HH:mm:ss"
    pub reservation_datetime: String,
    pub service_type: String,
    pub transportation: String,
    /// Fare in integer currency units, as a string
    pub price: String,
}

/// Input for canceling a reservation
#[derive(Debug, Clone)]
pub struct CancelReservation {
    /// Display label of a catalog reason (exact match)
    pub cancel_reason: String,
    /// Free-text detail, stored verbatim (blank allowed)
    pub cancel_detail: String,
}

/// Reservation service
pub struct ReservationService<R: ReservationRepository> {
    repo: Arc<R>,
}

impl<R: ReservationRepository> ReservationService<R> {
    /// Create a new reservation service
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a reservation
    ///
    /// Parses the scheduled date-time and the price, builds a confirmed
    /// reservation stamped with the current time, and persists it.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateReservation) -> AppResult<Reservation> {
        let reservation_datetime = parse_datetime(&input.reservation_datetime).map_err(|e| {
            warn!(
                "Rejecting booking with malformed date-time {:?}: {}",
                input.reservation_datetime, e
            );
            AppError::InvalidInput(BOOKING_PARSE_MESSAGE.to_string())
        })?;

        let price: i32 = input.price.parse().map_err(|_| {
            warn!("Rejecting booking with non-numeric price {:?}", input.price);
            AppError::InvalidInput(BOOKING_PARSE_MESSAGE.to_string())
        })?;

        let reservation = Reservation::new(
            input.departure_location,
            input.arrival_location,
            reservation_datetime,
            input.service_type,
            input.transportation,
            price,
            Utc::now().naive_utc(),
        );

        let created = self.repo.create(&reservation).await?;

        info!(
            "Created reservation {} ({} -> {})",
            created.id, created.departure_location, created.arrival_location
        );

        Ok(created)
    }

    /// Cancel a reservation
    ///
    /// Resolves the supplied reason label against the catalog, applies the
    /// reason and verbatim detail, and persists. Canceling an
    /// already-canceled reservation re-applies reason/detail; there is no
    /// transition guard and the last write wins.
    #[instrument(skip(self, input))]
    pub async fn cancel(
        &self,
        reservation_id: i64,
        input: CancelReservation,
    ) -> AppResult<Reservation> {
        let mut reservation = self
            .repo
            .find_by_id(reservation_id)
            .await?
            .ok_or(AppError::ReservationNotFound(reservation_id))?;

        let reason = CancelReason::from_label(&input.cancel_reason).ok_or_else(|| {
            warn!(
                "Unknown cancel reason label {:?} for reservation {}",
                input.cancel_reason, reservation_id
            );
            AppError::UnknownCancelReason(input.cancel_reason.clone())
        })?;

        debug!(
            "Canceling reservation {} with reason {}",
            reservation_id, reason
        );

        reservation.cancel(reason, input.cancel_detail);

        let updated = self.repo.update(&reservation).await?;

        info!("Canceled reservation {}", updated.id);

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::models::{format_datetime, ReservationStatus};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory reservation store
    #[derive(Default)]
    struct InMemoryReservations {
        rows: Mutex<HashMap<i64, Reservation>>,
        next_id: Mutex<i64>,
    }

    #[async_trait::async_trait]
    impl ReservationRepository for InMemoryReservations {
        async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self, reservation: &Reservation) -> AppResult<Reservation> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;

            let mut stored = reservation.clone();
            stored.id = *next;
            self.rows.lock().unwrap().insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn update(&self, reservation: &Reservation) -> AppResult<Reservation> {
            self.rows
                .lock()
                .unwrap()
                .insert(reservation.id, reservation.clone());
            Ok(reservation.clone())
        }
    }

    fn service() -> ReservationService<InMemoryReservations> {
        ReservationService::new(Arc::new(InMemoryReservations::default()))
    }

    fn booking() -> CreateReservation {
        CreateReservation {
            departure_location: "Central Station".to_string(),
            arrival_location: "City Hospital".to_string(),
            reservation_datetime: "2024-05-01 10:00:00".to_string(),
            service_type: "escort".to_string(),
            transportation: "taxi".to_string(),
            price: "15000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_echoes_input_and_confirms() {
        let svc = service();

        let created = svc.create(booking()).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.status, ReservationStatus::Confirmed);
        assert_eq!(created.departure_location, "Central Station");
        assert_eq!(created.arrival_location, "City Hospital");
        assert_eq!(created.price, 15000);
        assert_eq!(
            format_datetime(&created.reservation_datetime),
            "2024-05-01 10:00:00"
        );
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_datetime() {
        let svc = service();

        let mut input = booking();
        input.reservation_datetime = "2024/05/01 10:00".to_string();

        match svc.create(input).await {
            Err(AppError::InvalidInput(msg)) => {
                assert_eq!(msg, "guardian phone number must be provided")
            }
            other => panic!("expected InvalidInput, got {:?}", other.map(|r| r.id)),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_non_numeric_price() {
        let svc = service();

        let mut input = booking();
        input.price = "fifteen thousand".to_string();

        match svc.create(input).await {
            Err(AppError::InvalidInput(msg)) => {
                assert_eq!(msg, "guardian phone number must be provided")
            }
            other => panic!("expected InvalidInput, got {:?}", other.map(|r| r.id)),
        }
    }

    #[tokio::test]
    async fn test_cancel_unknown_reservation() {
        let svc = service();

        let result = svc
            .cancel(
                999,
                CancelReservation {
                    cancel_reason: "Change of mind".to_string(),
                    cancel_detail: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ReservationNotFound(999))));
    }

    #[tokio::test]
    async fn test_cancel_unknown_reason_label() {
        let svc = service();
        let created = svc.create(booking()).await.unwrap();

        let result = svc
            .cancel(
                created.id,
                CancelReservation {
                    cancel_reason: "No such reason".to_string(),
                    cancel_detail: "irrelevant".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::UnknownCancelReason(_))));
    }

    #[tokio::test]
    async fn test_cancel_persists_reason_and_verbatim_detail() {
        let svc = service();
        let created = svc.create(booking()).await.unwrap();

        let canceled = svc
            .cancel(
                created.id,
                CancelReservation {
                    cancel_reason: "Schedule changed".to_string(),
                    cancel_detail: "  flight moved  ".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(canceled.status, ReservationStatus::Canceled);
        assert_eq!(canceled.cancel_reason, Some(CancelReason::ScheduleChange));
        // Detail is stored verbatim, whitespace included
        assert_eq!(canceled.cancel_detail.as_deref(), Some("  flight moved  "));
    }

    #[tokio::test]
    async fn test_cancel_accepts_blank_detail() {
        let svc = service();
        let created = svc.create(booking()).await.unwrap();

        let canceled = svc
            .cancel(
                created.id,
                CancelReservation {
                    cancel_reason: "Change of mind".to_string(),
                    cancel_detail: String::new(),
                },
            )
            .await
            .unwrap();

        assert_eq!(canceled.cancel_detail.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_double_cancel_last_write_wins() {
        let svc = service();
        let created = svc.create(booking()).await.unwrap();

        svc.cancel(
            created.id,
            CancelReservation {
                cancel_reason: "Change of mind".to_string(),
                cancel_detail: "first".to_string(),
            },
        )
        .await
        .unwrap();

        let second = svc
            .cancel(
                created.id,
                CancelReservation {
                    cancel_reason: "Booked by mistake".to_string(),
                    cancel_detail: "second".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(second.cancel_reason, Some(CancelReason::WrongBooking));
        assert_eq!(second.cancel_detail.as_deref(), Some("second"));
    }
}
