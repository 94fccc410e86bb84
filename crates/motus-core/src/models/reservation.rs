//! Reservation entity and cancellation reason catalog
//!
//! A reservation is created once, mutated only by cancellation, and never
//! physically deleted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format for reservation date-times ("yyyy-MM-dd HH:mm:ss")
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a date-time string in the fixed wire format
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
}

/// Render a date-time back into the fixed wire format
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booking accepted and scheduled
    #[default]
    Confirmed,
    /// Booking canceled by the rider
    Canceled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Confirmed => write!(f, "confirmed"),
            ReservationStatus::Canceled => write!(f, "canceled"),
        }
    }
}

impl ReservationStatus {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "confirmed" => Some(ReservationStatus::Confirmed),
            "canceled" => Some(ReservationStatus::Canceled),
            _ => None,
        }
    }
}

/// Cancellation reason catalog
///
/// Closed set, not user-extensible at runtime. Each reason has a stable
/// code (persisted, used in APIs) and a display label (shown to riders and
/// matched against incoming cancellation requests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelReason {
    ChangeOfMind,
    ScheduleChange,
    WrongBooking,
    FoundAlternative,
    ServiceDissatisfaction,
}

impl CancelReason {
    /// Every reason in the catalog
    pub const ALL: [CancelReason; 5] = [
        CancelReason::ChangeOfMind,
        CancelReason::ScheduleChange,
        CancelReason::WrongBooking,
        CancelReason::FoundAlternative,
        CancelReason::ServiceDissatisfaction,
    ];

    /// Stable code, used for persistence and API payloads
    pub fn code(&self) -> &'static str {
        match self {
            CancelReason::ChangeOfMind => "CHANGE_OF_MIND",
            CancelReason::ScheduleChange => "SCHEDULE_CHANGE",
            CancelReason::WrongBooking => "WRONG_BOOKING",
            CancelReason::FoundAlternative => "FOUND_ALTERNATIVE",
            CancelReason::ServiceDissatisfaction => "SERVICE_DISSATISFACTION",
        }
    }

    /// Display label, used for presentation and input matching
    pub fn label(&self) -> &'static str {
        match self {
            CancelReason::ChangeOfMind => "Change of mind",
            CancelReason::ScheduleChange => "Schedule changed",
            CancelReason::WrongBooking => "Booked by mistake",
            CancelReason::FoundAlternative => "Found another ride",
            CancelReason::ServiceDissatisfaction => "Unhappy with the service",
        }
    }

    /// Resolve a display label to a catalog entry (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.label() == label)
    }

    /// Resolve a stable code to a catalog entry
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Reservation entity
///
/// Lifecycle:
/// 1. Created on a booking request (Confirmed)
/// 2. Optionally canceled, which applies reason/detail and flips status
///
/// Cancel reason/detail are only ever set together with the Canceled
/// status; there is no other mutation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier (assigned by the store)
    pub id: i64,

    /// Pickup location
    pub departure_location: String,

    /// Drop-off location
    pub arrival_location: String,

    /// Scheduled ride date-time
    pub reservation_datetime: NaiveDateTime,

    /// Kind of service booked (e.g. hospital escort)
    pub service_type: String,

    /// Transportation mode (e.g. taxi, wheelchair van)
    pub transportation: String,

    /// Fare in integer currency units
    pub price: i32,

    /// Creation timestamp
    pub created_time: NaiveDateTime,

    /// Current status
    pub status: ReservationStatus,

    /// Reason applied at cancellation
    pub cancel_reason: Option<CancelReason>,

    /// Free-text detail supplied at cancellation
    pub cancel_detail: Option<String>,
}

impl Reservation {
    /// Build a new confirmed reservation
    pub fn new(
        departure_location: String,
        arrival_location: String,
        reservation_datetime: NaiveDateTime,
        service_type: String,
        transportation: String,
        price: i32,
        created_time: NaiveDateTime,
    ) -> Self {
        Self {
            id: 0,
            departure_location,
            arrival_location,
            reservation_datetime,
            service_type,
            transportation,
            price,
            created_time,
            status: ReservationStatus::Confirmed,
            cancel_reason: None,
            cancel_detail: None,
        }
    }

    /// Apply a cancellation
    ///
    /// Sets reason, detail, and the Canceled status together. The detail is
    /// stored verbatim, blank included. Re-applying on an already-canceled
    /// reservation overwrites the previous reason/detail.
    pub fn cancel(&mut self, reason: CancelReason, detail: String) {
        self.cancel_reason = Some(reason);
        self.cancel_detail = Some(detail);
        self.status = ReservationStatus::Canceled;
    }

    /// Whether the reservation has been canceled
    pub fn is_canceled(&self) -> bool {
        self.status == ReservationStatus::Canceled
    }
}
