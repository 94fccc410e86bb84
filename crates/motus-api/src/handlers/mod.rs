//! HTTP request handlers

pub mod payment;
pub mod reservation;
pub mod tracking;

pub use payment::configure as configure_payment;
pub use reservation::configure as configure_reservations;
pub use tracking::configure as configure_tracking;
