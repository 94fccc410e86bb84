//! Reservation repository implementation
//!
//! Provides PostgreSQL-backed storage for reservations. Cancellation is an
//! in-place update; rows are never deleted.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use motus_core::{
    models::{CancelReason, Reservation, ReservationStatus},
    traits::ReservationRepository,
    AppError, AppResult,
};
use sqlx::PgPool;
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of ReservationRepository
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    /// Create a new reservation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parse reservation status from its stored form
    fn parse_status(s: &str) -> ReservationStatus {
        ReservationStatus::parse(s).unwrap_or(ReservationStatus::Confirmed)
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>> {
        debug!("Finding reservation by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, ReservationRow>(
            r#"
            SELECT
                id, departure_location, arrival_location, reservation_datetime,
                service_type, transportation, price, created_time,
                status, cancel_reason, cancel_detail
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding reservation {}: {}", id, e);
            AppError::Database(format!("Failed to find reservation: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self, reservation))]
    async fn create(&self, reservation: &Reservation) -> AppResult<Reservation> {
        debug!(
            "Creating reservation {} -> {}",
            reservation.departure_location, reservation.arrival_location
        );

        let row = sqlx::query_as::<sqlx::Postgres, ReservationRow>(
            r#"
            INSERT INTO reservations (
                departure_location, arrival_location, reservation_datetime,
                service_type, transportation, price, created_time,
                status, cancel_reason, cancel_detail
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, departure_location, arrival_location, reservation_datetime,
                service_type, transportation, price, created_time,
                status, cancel_reason, cancel_detail
            "#,
        )
        .bind(&reservation.departure_location)
        .bind(&reservation.arrival_location)
        .bind(reservation.reservation_datetime)
        .bind(&reservation.service_type)
        .bind(&reservation.transportation)
        .bind(reservation.price)
        .bind(reservation.created_time)
        .bind(reservation.status.to_string())
        .bind(reservation.cancel_reason.map(|r| r.code()))
        .bind(&reservation.cancel_detail)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating reservation: {}", e);
            AppError::Database(format!("Failed to create reservation: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, reservation))]
    async fn update(&self, reservation: &Reservation) -> AppResult<Reservation> {
        debug!("Updating reservation: {}", reservation.id);

        let row = sqlx::query_as::<sqlx::Postgres, ReservationRow>(
            r#"
            UPDATE reservations
            SET departure_location = $2,
                arrival_location = $3,
                reservation_datetime = $4,
                service_type = $5,
                transportation = $6,
                price = $7,
                status = $8,
                cancel_reason = $9,
                cancel_detail = $10
            WHERE id = $1
            RETURNING
                id, departure_location, arrival_location, reservation_datetime,
                service_type, transportation, price, created_time,
                status, cancel_reason, cancel_detail
            "#,
        )
        .bind(reservation.id)
        .bind(&reservation.departure_location)
        .bind(&reservation.arrival_location)
        .bind(reservation.reservation_datetime)
        .bind(&reservation.service_type)
        .bind(&reservation.transportation)
        .bind(reservation.price)
        .bind(reservation.status.to_string())
        .bind(reservation.cancel_reason.map(|r| r.code()))
        .bind(&reservation.cancel_detail)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error updating reservation {}: {}",
                reservation.id, e
            );
            AppError::Database(format!("Failed to update reservation: {}", e))
        })?;

        Ok(row.into())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    id: i64,
    departure_location: String,
    arrival_location: String,
    reservation_datetime: NaiveDateTime,
    service_type: String,
    transportation: String,
    price: i32,
    created_time: NaiveDateTime,
    status: String,
    cancel_reason: Option<String>,
    cancel_detail: Option<String>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: row.id,
            departure_location: row.departure_location,
            arrival_location: row.arrival_location,
            reservation_datetime: row.reservation_datetime,
            service_type: row.service_type,
            transportation: row.transportation,
            price: row.price,
            created_time: row.created_time,
            status: PgReservationRepository::parse_status(&row.status),
            cancel_reason: row.cancel_reason.as_deref().and_then(CancelReason::from_code),
            cancel_detail: row.cancel_detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::models::parse_datetime;

    #[test]
    fn test_parse_status() {
        assert_eq!(
            PgReservationRepository::parse_status("confirmed"),
            ReservationStatus::Confirmed
        );
        assert_eq!(
            PgReservationRepository::parse_status("canceled"),
            ReservationStatus::Canceled
        );
        // Unknown stored values fall back to confirmed rather than failing the read
        assert_eq!(
            PgReservationRepository::parse_status("???"),
            ReservationStatus::Confirmed
        );
    }

    #[test]
    fn test_row_conversion() {
        let row = ReservationRow {
            id: 11,
            departure_location: "A".to_string(),
            arrival_location: "B".to_string(),
            reservation_datetime: parse_datetime("2024-05-01 10:00:00").unwrap(),
            service_type: "escort".to_string(),
            transportation: "taxi".to_string(),
            price: 15000,
            created_time: parse_datetime("2024-04-28 09:30:00").unwrap(),
            status: "canceled".to_string(),
            cancel_reason: Some("SCHEDULE_CHANGE".to_string()),
            cancel_detail: Some("flight moved".to_string()),
        };

        let reservation: Reservation = row.into();
        assert_eq!(reservation.id, 11);
        assert_eq!(reservation.status, ReservationStatus::Canceled);
        assert_eq!(
            reservation.cancel_reason,
            Some(CancelReason::ScheduleChange)
        );
        assert_eq!(reservation.cancel_detail.as_deref(), Some("flight moved"));
    }
}
