//! Configuration for the verification service

use da_shared::config::VerificationConfig;

/// Default lifetime of a one-time code
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 30;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a one-time code expires
    pub code_ttl_minutes: i64,
    /// Device identifier recorded when the request carries none
    pub default_device_id: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            default_device_id: "unregistered".to_string(),
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_ttl_minutes: config.code_ttl_minutes,
            default_device_id: config.default_device_id.clone(),
        }
    }
}
