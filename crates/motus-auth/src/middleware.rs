//! Actix-web authentication extractor
//!
//! Resolves the authenticated caller from the request so handlers can pass
//! the user identity into services as an explicit parameter.

use crate::jwt::JwtService;
use crate::Claims;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use motus_core::error::AppError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Extract JWT token from request
///
/// Checks for token in the following order:
/// 1. Authorization header (Bearer token)
/// 2. Cookie named "token"
fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    // Try Authorization header first
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    // Try cookie
    if let Some(cookie) = req.cookie("token") {
        return Some(cookie.value().to_string());
    }

    None
}

/// Authenticated user extractor
///
/// Extracts and validates the JWT token from the request. A missing or
/// invalid token rejects the request with 401 before the handler runs.
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpResponse;
/// use motus_auth::AuthenticatedUser;
///
/// async fn protected_handler(user: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().json(serde_json::json!({ "userId": user.user_id }))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Identifier of the authenticated user (token subject)
    pub user_id: String,

    /// Full claims from the JWT token
    pub claims: Claims,
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Extract JWT service from app data
        let jwt_service = match req.app_data::<web::Data<Arc<JwtService>>>() {
            Some(service) => service.get_ref().clone(),
            None => {
                warn!("JwtService not found in app data");
                return ready(Err(AppError::Unauthorized(
                    "Authentication service not configured".to_string(),
                )
                .into()));
            }
        };

        // Extract token from request
        let token = match extract_token_from_request(req) {
            Some(t) => t,
            None => {
                debug!("No authentication token found in request");
                return ready(Err(AppError::Unauthorized(
                    "No authentication token provided".to_string(),
                )
                .into()));
            }
        };

        // Validate token and extract claims
        match jwt_service.validate_token(&token) {
            Ok(claims) => {
                debug!(user_id = %claims.sub, "User authenticated successfully");

                ready(Ok(AuthenticatedUser {
                    user_id: claims.sub.clone(),
                    claims,
                }))
            }
            Err(e) => {
                warn!(error = %e, "Token validation failed");
                ready(Err(e.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_token_from_bearer_header() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();

        assert_eq!(
            extract_token_from_request(&req),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_extract_token_missing() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_token_from_request(&req), None);
    }

    #[test]
    fn test_extract_token_ignores_non_bearer() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();

        assert_eq!(extract_token_from_request(&req), None);
    }
}
