//! Error types for driver invitation and one-time code verification

use da_shared::error_codes;
use thiserror::Error;

/// Client-caused failures of the invitation and verification flow
///
/// Every variant is terminal for the current call and non-retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Request needs to have an ID")]
    IdNotPresent,

    #[error("A new driver cannot already have an ID")]
    IdExists,

    #[error("Invalid phone number format: {phone}")]
    InvalidPhone { phone: String },

    #[error("Device ID must be at most {max} characters")]
    InvalidDeviceId { max: usize },

    #[error("Driver not found: {id}")]
    DriverNotFound { id: String },

    #[error("User already confirmed")]
    AlreadyConfirmed,

    #[error("Code expired, request another")]
    CodeExpired,

    #[error("Code mismatch, reenter the code")]
    CodeMismatch,
}

impl VerificationError {
    /// Machine-readable reason code reported to clients
    pub fn reason_code(&self) -> &'static str {
        match self {
            VerificationError::IdNotPresent => error_codes::ID_NOT_PRESENT,
            VerificationError::IdExists => error_codes::ID_EXISTS,
            VerificationError::InvalidPhone { .. } => error_codes::INVALID_PHONE,
            VerificationError::InvalidDeviceId { .. } => error_codes::INVALID_DEVICE_ID,
            VerificationError::DriverNotFound { .. } => error_codes::ID_NOT_FOUND,
            VerificationError::AlreadyConfirmed => error_codes::ALREADY_CONFIRMED,
            VerificationError::CodeExpired => error_codes::CODE_EXPIRED,
            VerificationError::CodeMismatch => error_codes::CODE_MISMATCH,
        }
    }

    /// Broad category of the failure
    pub fn kind(&self) -> VerificationErrorKind {
        match self {
            VerificationError::IdNotPresent
            | VerificationError::IdExists
            | VerificationError::InvalidPhone { .. }
            | VerificationError::InvalidDeviceId { .. } => VerificationErrorKind::InvalidRequest,
            VerificationError::DriverNotFound { .. } => VerificationErrorKind::NotFound,
            VerificationError::AlreadyConfirmed => VerificationErrorKind::Conflict,
            VerificationError::CodeExpired => VerificationErrorKind::Expired,
            VerificationError::CodeMismatch => VerificationErrorKind::Mismatch,
        }
    }
}

/// Taxonomy used by the HTTP layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationErrorKind {
    /// Missing or malformed required input
    InvalidRequest,
    /// The referenced driver does not exist
    NotFound,
    /// State precondition violated
    Conflict,
    /// Time window violated
    Expired,
    /// Credential comparison failed
    Mismatch,
}
