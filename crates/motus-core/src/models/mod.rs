//! Domain models for the Motus backend
//!
//! This module contains all the core domain models used throughout the application.

pub mod accompany;
pub mod payment;
pub mod reservation;

pub use accompany::Accompany;
pub use payment::BillingKey;
pub use reservation::{
    format_datetime, parse_datetime, CancelReason, Reservation, ReservationStatus,
    DATETIME_FORMAT,
};
