use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use da_core::repositories::{DeviceRepository, DriverRepository, DriverSearchRepository};

use crate::dto::{CapturePhoneRequest, DriverResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/drivers-phonenumber-capture
///
/// Invites a driver by phone number and issues a one-time code.
///
/// # Request Body
///
/// ```json
/// {
///     "firstName": "Ada",
///     "lastName": "Lovelace",
///     "email": "ada@example.com",
///     "phoneNumber": "+14016369040"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// `Location: /api/drivers-phonenumber-capture/{id}` and the driver in
/// INVITED state, without the code.
///
/// ## Errors
/// - 400 Bad Request: `idexists`, `invalidPhone` or `validation_error`
/// - 500 Internal Server Error: store failure
pub async fn capture_phone<D, V, S>(
    state: web::Data<AppState<D, V, S>>,
    request: web::Json<CapturePhoneRequest>,
) -> HttpResponse
where
    D: DriverRepository + 'static,
    V: DeviceRepository + 'static,
    S: DriverSearchRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state.verification_service.invite(request.into()).await {
        Ok(driver) => HttpResponse::Created()
            .insert_header((
                header::LOCATION,
                format!("/api/drivers-phonenumber-capture/{}", driver.id),
            ))
            .json(DriverResponse::from(driver)),
        Err(error) => handle_domain_error(error),
    }
}
