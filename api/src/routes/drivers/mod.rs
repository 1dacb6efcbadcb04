//! Driver onboarding route handlers
//!
//! - Phone number capture (invitation with a one-time code)
//! - One-time code verification

pub mod capture_phone;
pub mod verify_token;

use std::sync::Arc;

use da_core::repositories::{DeviceRepository, DriverRepository, DriverSearchRepository};
use da_core::services::verification::VerificationService;

pub use capture_phone::capture_phone;
pub use verify_token::verify_token;

/// Application state shared by the driver handlers
pub struct AppState<D, V, S>
where
    D: DriverRepository,
    V: DeviceRepository,
    S: DriverSearchRepository,
{
    pub verification_service: Arc<VerificationService<D, V, S>>,
}
