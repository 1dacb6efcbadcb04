//! One-time code verification for invited drivers
//!
//! This module provides the phone verification workflow:
//! - Inviting a driver with a freshly generated, time-limited code
//! - Verifying the submitted code and confirming the driver
//! - Registering the verifying device
//! - Best-effort mirroring of the result into the search index

mod config;
mod service;
mod traits;
mod types;

pub mod mock;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{Clock, CodeGenerator, RandomCodeGenerator, SystemClock, CODE_MAX, CODE_MIN};
pub use types::{InviteDriver, VerifyCode};
