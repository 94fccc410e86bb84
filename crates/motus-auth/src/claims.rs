//! JWT Claims structure

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// JWT Claims
///
/// The subject is the user identifier (a UUID issued by the identity
/// service); it is the value passed into services as the caller identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for a user
    ///
    /// The expiration is left at zero and filled in by `JwtService` when
    /// the token is created.
    pub fn new(user_id: &str) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: 0,
        }
    }

    /// Create new claims with a custom expiration duration
    pub fn with_expiration(user_id: &str, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in_secs);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        self.exp <= now
    }

    /// Get the user identifier from the claims
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}
