use actix_web::{http::header, web, HttpResponse};

use da_core::repositories::{DeviceRepository, DriverRepository, DriverSearchRepository};

use crate::dto::{DriverResponse, VerifyTokenRequest};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/drivers-verify-token
///
/// Verifies the one-time code of an invited driver and confirms the driver.
///
/// # Request Body
///
/// ```json
/// {
///     "id": "0b7e2d6c-4f0a-4d8e-9a51-2f4c8d0e1a77",
///     "oneTimeCode": "482913",
///     "deviceId": "pixel-8-a1b2"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// `Location: /api/drivers-verify-token/{id}` and the CONFIRMED driver with
/// its single registered device.
///
/// ## Errors
/// - 400 Bad Request: `idnotpresent`, `codeMisMatch`, `invalidDeviceId` or malformed body
/// - 404 Not Found: `idnotfound`
/// - 409 Conflict: `alreadyConfirmed`
/// - 410 Gone: `codeExpired`
/// - 500 Internal Server Error: store failure
pub async fn verify_token<D, V, S>(
    state: web::Data<AppState<D, V, S>>,
    request: web::Json<VerifyTokenRequest>,
) -> HttpResponse
where
    D: DriverRepository + 'static,
    V: DeviceRepository + 'static,
    S: DriverSearchRepository + 'static,
{
    match state.verification_service.verify(request.into_inner().into()).await {
        Ok(driver) => HttpResponse::Created()
            .insert_header((
                header::LOCATION,
                format!("/api/drivers-verify-token/{}", driver.id),
            ))
            .json(DriverResponse::from(driver)),
        Err(error) => handle_domain_error(error),
    }
}
