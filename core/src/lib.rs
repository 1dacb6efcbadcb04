//! # DriverApp Core
//!
//! Core business logic and domain layer for the DriverApp backend.
//! This crate contains domain entities, the phone verification service,
//! repository interfaces and error types that form the foundation of the
//! application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{DeviceDetails, Driver, DriverStatus};
pub use errors::{DomainError, DomainResult, VerificationError, VerificationErrorKind};
pub use repositories::{DeviceRepository, DriverRepository, DriverSearchRepository};
pub use services::verification::{InviteDriver, VerificationService, VerificationServiceConfig, VerifyCode};
