//! Application factory
//!
//! Builds the Actix-web application around an already initialized
//! [`AppState`], so the binary and the HTTP tests share one route table.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use da_core::repositories::{DeviceRepository, DriverRepository, DriverSearchRepository};
use da_shared::config::{Environment, ServerConfig};
use da_shared::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::middleware::cors::create_cors;
use crate::routes::drivers::{capture_phone, verify_token, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<D, V, S>(
    app_state: web::Data<AppState<D, V, S>>,
    environment: Environment,
    server: &ServerConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    D: DriverRepository + 'static,
    V: DeviceRepository + 'static,
    S: DriverSearchRepository + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(create_cors(environment, server))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route(
                    "/drivers-phonenumber-capture",
                    web::post().to(capture_phone::<D, V, S>),
                )
                .route("/drivers-verify-token", web::post().to(verify_token::<D, V, S>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "driverapp-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
