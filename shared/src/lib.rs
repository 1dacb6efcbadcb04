//! Shared utilities and common types for the DriverApp server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered loader
//! - Error response structure and reason codes
//! - Utility functions (phone normalization and masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, LoggingConfig, SearchConfig, ServerConfig,
    VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::phone;
