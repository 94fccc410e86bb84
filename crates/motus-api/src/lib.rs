//! API layer for the Motus backend
//!
//! HTTP handlers and DTOs for reservations, companion tracking, and
//! payment operations.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::cargo)]

pub mod dto;
pub mod handlers;

// Re-export the response envelope
pub use dto::ApiResponse;

// Re-export handler configuration functions
pub use handlers::{configure_payment, configure_reservations, configure_tracking};
