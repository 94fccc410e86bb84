//! Common traits for repositories
//!
//! Defines abstractions for durable storage so that services can be tested
//! against in-memory fakes.

use crate::error::AppError;
use crate::models::{Accompany, BillingKey, Reservation};
use async_trait::async_trait;

/// Reservation store
///
/// Reservations are created once and updated in place by cancellation;
/// there is no delete.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Find a reservation by identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError>;

    /// Persist a new reservation, returning it with its assigned id
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError>;

    /// Persist an updated reservation
    async fn update(&self, reservation: &Reservation) -> Result<Reservation, AppError>;
}

/// Companion tracking store
#[async_trait]
pub trait AccompanyRepository: Send + Sync {
    /// List all tracking entries for a reservation, oldest first
    ///
    /// Returns an empty list (not an error) when the reservation has none.
    async fn list_by_reservation(&self, reservation_id: i64) -> Result<Vec<Accompany>, AppError>;

    /// Persist a new tracking entry, returning it with its assigned id
    async fn create(&self, accompany: &Accompany) -> Result<Accompany, AppError>;
}

/// Billing key store
///
/// At most one billing key per user; `save` replaces an existing key.
#[async_trait]
pub trait BillingKeyRepository: Send + Sync {
    /// Find the stored billing key for a user
    async fn find_by_user(&self, user_id: &str) -> Result<Option<BillingKey>, AppError>;

    /// Store a billing key for a user, replacing any previous one
    async fn save(&self, key: &BillingKey) -> Result<BillingKey, AppError>;

    /// Remove the stored billing key for a user
    ///
    /// Returns whether a key was removed.
    async fn delete_by_user(&self, user_id: &str) -> Result<bool, AppError>;

    /// Check whether a user has a stored billing key
    async fn exists(&self, user_id: &str) -> Result<bool, AppError>;
}
