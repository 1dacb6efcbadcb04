//! CORS middleware configuration for cross-origin requests.
//!
//! Driver mobile apps and the web back office call the API from other
//! origins. Development is permissive; production only accepts the origins
//! listed in `server.allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use da_shared::config::{Environment, ServerConfig};

/// Preflight cache lifetime in seconds
const CORS_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for the given environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_production() {
        create_production_cors(&server.allowed_origins)
    } else {
        create_development_cors()
    }
}

fn create_development_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-app-version"),
            header::HeaderName::from_static("x-device-id"),
        ])
        .expose_headers(vec![header::LOCATION])
        .max_age(CORS_MAX_AGE)
}

fn create_production_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-app-version"),
            header::HeaderName::from_static("x-device-id"),
        ])
        .expose_headers(vec![header::LOCATION])
        .max_age(CORS_MAX_AGE);

    for origin in allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    // Mobile app webviews
    cors = cors.allowed_origin("capacitor://localhost");
    cors = cors.allowed_origin("ionic://localhost");

    cors
}
