//! One-time code verification settings

use serde::{Deserialize, Serialize};

/// Settings for driver invitation and code verification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a freshly issued code stays valid
    #[serde(default = "default_code_ttl_minutes")]
    pub code_ttl_minutes: i64,

    /// Device identifier recorded when the client does not send one
    #[serde(default = "default_device_id")]
    pub default_device_id: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: default_code_ttl_minutes(),
            default_device_id: default_device_id(),
        }
    }
}

fn default_code_ttl_minutes() -> i64 {
    30
}

fn default_device_id() -> String {
    String::from("unregistered")
}
