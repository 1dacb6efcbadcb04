//! Input types for the verification service

/// Request to invite a driver by phone number
#[derive(Debug, Clone, Default)]
pub struct InviteDriver {
    /// Must be absent; identifiers are assigned on creation
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: String,
}

/// Request to verify a one-time code
#[derive(Debug, Clone, Default)]
pub struct VerifyCode {
    /// Identifier of the invited driver
    pub driver_id: Option<String>,
    /// Code as typed by the driver
    pub one_time_code: Option<String>,
    /// Identifier of the device performing the verification
    pub device_id: Option<String>,
}
