//! Request and response bodies of the driver endpoints

pub mod driver_dto;

pub use da_shared::ErrorResponse;
pub use driver_dto::{CapturePhoneRequest, DriverResponse, VerifyTokenRequest};
