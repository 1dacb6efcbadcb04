use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use da_core::errors::{DomainError, VerificationError, VerificationErrorKind};
use da_shared::error_codes;

use crate::dto::ErrorResponse;

/// HTTP status for a verification failure
pub fn status_for(error: &VerificationError) -> StatusCode {
    match error.kind() {
        VerificationErrorKind::InvalidRequest | VerificationErrorKind::Mismatch => {
            StatusCode::BAD_REQUEST
        }
        VerificationErrorKind::NotFound => StatusCode::NOT_FOUND,
        VerificationErrorKind::Conflict => StatusCode::CONFLICT,
        VerificationErrorKind::Expired => StatusCode::GONE,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Verification(error) => {
            log::warn!("Verification rejected: {}", error.reason_code());
            HttpResponse::build(status_for(&error))
                .json(ErrorResponse::new(error.reason_code(), error.to_string()))
        }
        DomainError::Validation { message } => {
            log::warn!("Validation error: {}", message);
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
        }
        DomainError::Internal { message } => {
            // Store details stay in the log
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 response listing field validation failures
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("validation_errors", &errors),
    )
}

/// Error handler for `web::JsonConfig`: malformed bodies become 400 `validation_error`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body")
            .add_detail("reason", err.to_string()),
    );
    InternalError::from_response(err, response).into()
}
