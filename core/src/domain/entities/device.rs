//! Device record registered when a driver verifies their phone number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest client device identifier the device store accepts
pub const MAX_DEVICE_ID_LENGTH: usize = 255;

/// Device details entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    /// Unique identifier of the record
    pub id: String,

    /// Identifier reported by the client device
    pub device_id: String,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

impl DeviceDetails {
    /// Creates a fresh device record
    pub fn new(device_id: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            device_id,
            created_at: now,
        }
    }
}
