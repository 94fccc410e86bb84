//! Companion tracking records
//!
//! An accompany record is a tracked companion entry tied to a reservation:
//! a location or check-in snapshot reported while the ride is underway.
//! This slice of the system is storage glue; records are created and
//! listed, never updated.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Companion tracking entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accompany {
    /// Unique identifier (assigned by the store)
    pub id: i64,

    /// Reservation this entry belongs to
    pub reservation_id: i64,

    /// Reported status (free text, e.g. "PICKUP", "ARRIVED")
    pub status: String,

    /// Reported latitude
    pub latitude: f64,

    /// Reported longitude
    pub longitude: f64,

    /// Moment the entry was reported
    pub time: NaiveDateTime,

    /// Optional free-text note
    pub detail: Option<String>,
}

impl Accompany {
    /// Build a new tracking entry for a reservation
    pub fn new(
        reservation_id: i64,
        status: String,
        latitude: f64,
        longitude: f64,
        time: NaiveDateTime,
        detail: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            reservation_id,
            status,
            latitude,
            longitude,
            time,
            detail,
        }
    }
}
