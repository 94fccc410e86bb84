//! Reservation DTOs

use motus_core::models::{format_datetime, Reservation};
use motus_services::{CancelReservation, CreateReservation};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Booking request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[validate(length(min = 1))]
    pub departure_location: String,

    #[validate(length(min = 1))]
    pub arrival_location: String,

    /// "yyyy-MM-dd HH:mm:ss"
    #[validate(length(min = 1))]
    pub reservation_date_time: String,

    #[validate(length(min = 1))]
    pub service_type: String,

    #[validate(length(min = 1))]
    pub transportation: String,

    /// Fare in integer currency units, as a string
    #[validate(length(min = 1))]
    pub price: String,
}

impl From<ReservationRequest> for CreateReservation {
    fn from(req: ReservationRequest) -> Self {
        Self {
            departure_location: req.departure_location,
            arrival_location: req.arrival_location,
            reservation_datetime: req.reservation_date_time,
            service_type: req.service_type,
            transportation: req.transportation,
            price: req.price,
        }
    }
}

/// Cancellation request
///
/// `cancelReason` is a catalog display label; `cancelDetail` is free text
/// and is stored verbatim (blank included).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub cancel_reason: String,
    pub cancel_detail: String,
}

impl From<CancelRequest> for CancelReservation {
    fn from(req: CancelRequest) -> Self {
        Self {
            cancel_reason: req.cancel_reason,
            cancel_detail: req.cancel_detail,
        }
    }
}

/// Reservation projection returned by create and cancel
///
/// The same shape for both operations; status is not part of it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub departure_location: String,
    pub arrival_location: String,
    pub reservation_date_time: String,
    pub service_type: String,
    pub transportation: String,
    pub price: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            departure_location: reservation.departure_location,
            arrival_location: reservation.arrival_location,
            reservation_date_time: format_datetime(&reservation.reservation_datetime),
            service_type: reservation.service_type,
            transportation: reservation.transportation,
            price: reservation.price.to_string(),
        }
    }
}
