//! Common DTOs used across the API

use serde::Serialize;

/// Standard API response envelope
///
/// Every endpoint wraps its payload in `{success, message, data}`.
/// Failures are rendered in the same shape (with `data: null`) by the
/// `AppError` response mapping.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Response payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a success envelope
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
