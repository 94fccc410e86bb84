//! Motus Database Layer
//!
//! This crate provides PostgreSQL database access and repository implementations
//! for the Motus backend. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for reservations, tracking entries, and billing keys

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use motus_core::{AppError, AppResult};
pub use sqlx::{PgPool, Postgres};
