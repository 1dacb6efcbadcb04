use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use da_core::{DeviceDetails, Driver, DriverStatus, InviteDriver, VerifyCode};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapturePhoneRequest {
    pub id: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: String,
}

impl From<CapturePhoneRequest> for InviteDriver {
    fn from(request: CapturePhoneRequest) -> Self {
        InviteDriver {
            id: request.id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
        }
    }
}

/// Body of a token verification; unknown keys are ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenRequest {
    pub id: Option<String>,
    pub one_time_code: Option<String>,
    pub device_id: Option<String>,
}

impl From<VerifyTokenRequest> for VerifyCode {
    fn from(request: VerifyTokenRequest) -> Self {
        VerifyCode {
            driver_id: request.id,
            one_time_code: request.one_time_code,
            device_id: request.device_id,
        }
    }
}

/// Driver as returned to clients; the one-time code is never exposed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: String,
    pub status: DriverStatus,
    pub one_time_expiration_time: Option<DateTime<Utc>>,
    pub devices: Vec<DeviceDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name,
            last_name: driver.last_name,
            email: driver.email,
            phone_number: driver.phone_number,
            status: driver.status,
            one_time_expiration_time: driver.one_time_expiration_time,
            devices: driver.devices,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}
