//! Motus Backend Server
//!
//! Backend for the ride reservation platform: booking creation and
//! cancellation, companion tracking, and payment/billing-key operations
//! against the payment gateway.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use motus_api::handlers::{configure_payment, configure_reservations, configure_tracking};
use motus_auth::JwtService;
use motus_core::AppConfig;
use motus_db::create_pool;
use motus_gateway::PayClient;
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "motus-backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check))
            // Booking endpoints
            .configure(configure_reservations)
            // Companion tracking endpoints
            .configure(configure_tracking)
            // Payment endpoints (authenticated)
            .configure(configure_payment),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "motus_backend={},motus_api={},motus_services={},motus_db={},motus_gateway={},actix_web=info,sqlx=warn",
            log_level, log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting Motus Backend v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        panic!("Failed to load configuration: {}", e);
    });

    // Create auth service
    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.jwt_expiration_secs,
    ));

    info!(
        "JWT service configured with {} second token expiration",
        config.auth.jwt_expiration_secs
    );

    // Create payment gateway client
    let pay_client = Arc::new(
        PayClient::new(
            &config.gateway.base_url,
            &config.gateway.client_key,
            &config.gateway.secret_key,
            config.gateway.timeout_ms,
        )
        .unwrap_or_else(|e| panic!("Failed to create gateway client: {}", e)),
    );

    info!(
        "Payment gateway client configured for {}",
        config.gateway.base_url
    );

    // CORS configuration
    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, Some(config.database.max_connections))
        .await
        .unwrap_or_else(|e| panic!("Failed to create database pool: {}", e));

    info!(
        "Database connection established with {} max connections",
        config.database.max_connections
    );

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    // Clone services for closure
    let jwt_service_clone = jwt_service.clone();
    let pay_client_clone = pay_client.clone();

    // Create and run server
    HttpServer::new(move || {
        // Configure CORS - clone cors_origins for each worker
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
                header::COOKIE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            // Add database pool to app data
            .app_data(web::Data::new(pool.clone()))
            // Add auth service and gateway client
            .app_data(web::Data::new(jwt_service_clone.clone()))
            .app_data(web::Data::new(pay_client_clone.clone()))
            // Middleware
            .wrap(cors)
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
