//! Authentication for the Motus backend
//!
//! This crate provides JWT validation and an Actix-web request extractor
//! that resolves the authenticated caller. Token issuance and user
//! management live in a separate identity service; this backend only
//! validates bearer tokens and hands the caller's identity to services as
//! an explicit parameter.
//!
//! # Examples
//!
//! ## Validating a token
//!
//! ```no_run
//! use motus_auth::{Claims, JwtService};
//!
//! let jwt_service = JwtService::new("your-secret-key", 1800);
//! let claims = Claims::new("0b37a9f4-7a11-4a8c-a0a7-2f8f3a0f1d2e");
//! let token = jwt_service.create_token(&claims)?;
//! let decoded = jwt_service.validate_token(&token)?;
//! assert_eq!(decoded.sub, claims.sub);
//! # Ok::<(), motus_core::error::AppError>(())
//! ```
//!
//! ## Using the extractor in Actix-web
//!
//! ```no_run
//! use actix_web::HttpResponse;
//! use motus_auth::AuthenticatedUser;
//!
//! async fn protected_route(user: AuthenticatedUser) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "userId": user.user_id }))
//! }
//! ```

pub mod claims;
pub mod jwt;
pub mod middleware;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::AuthenticatedUser;
