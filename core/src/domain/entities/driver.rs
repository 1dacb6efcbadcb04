//! Driver entity representing a driver onboarded through phone verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::device::DeviceDetails;

/// Lifecycle state of a driver account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DriverStatus {
    /// Phone number captured, one-time code issued and not yet verified
    Invited,
    /// Phone number proven by a one-time code
    Confirmed,
    /// Confirmed driver that completed onboarding
    Active,
    /// Account disabled
    Inactive,
}

impl DriverStatus {
    /// Storage and wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Invited => "INVITED",
            DriverStatus::Confirmed => "CONFIRMED",
            DriverStatus::Active => "ACTIVE",
            DriverStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INVITED" => Ok(DriverStatus::Invited),
            "CONFIRMED" => Ok(DriverStatus::Confirmed),
            "ACTIVE" => Ok(DriverStatus::Active),
            "INACTIVE" => Ok(DriverStatus::Inactive),
            _ => Err(format!("Unknown driver status: {}", s)),
        }
    }
}

/// Driver entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Opaque identifier, assigned on creation and never changed
    pub id: String,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    pub email: Option<String>,

    /// Normalized phone number the one-time code was issued for
    pub phone_number: String,

    pub status: DriverStatus,

    /// Digits issued at invitation time
    pub one_time_code: Option<String>,

    /// The code is valid strictly before this instant
    pub one_time_expiration_time: Option<DateTime<Utc>>,

    /// Devices registered by the last successful verification
    #[serde(default)]
    pub devices: Vec<DeviceDetails>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// Creates a driver in INVITED state holding a freshly issued code
    ///
    /// # Arguments
    ///
    /// * `phone_number` - Normalized phone number
    /// * `code` - The one-time code
    /// * `now` - Current instant, used for timestamps and expiry
    /// * `ttl_minutes` - Minutes the code remains valid
    pub fn invite(phone_number: String, code: String, now: DateTime<Utc>, ttl_minutes: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: None,
            last_name: None,
            email: None,
            phone_number,
            status: DriverStatus::Invited,
            one_time_code: Some(code),
            one_time_expiration_time: Some(now + Duration::minutes(ttl_minutes)),
            devices: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the profile name fields
    pub fn with_name(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Whether verification may proceed from the current state
    pub fn is_invited(&self) -> bool {
        self.status == DriverStatus::Invited
    }

    /// Whether the one-time code is no longer usable at `now`
    ///
    /// A driver without an expiration instant is treated as expired.
    pub fn is_code_expired(&self, now: DateTime<Utc>) -> bool {
        match self.one_time_expiration_time {
            Some(expires_at) => now >= expires_at,
            None => true,
        }
    }

    /// Case-insensitive, constant-time comparison against the stored code
    pub fn code_matches(&self, submitted: &str) -> bool {
        let Some(stored) = self.one_time_code.as_deref() else {
            return false;
        };
        let stored = stored.to_ascii_lowercase();
        let submitted = submitted.to_ascii_lowercase();
        if stored.len() != submitted.len() {
            return false;
        }
        constant_time_eq(stored.as_bytes(), submitted.as_bytes())
    }

    /// Transitions to CONFIRMED, replacing all devices with `device`
    pub fn confirm(&mut self, device: DeviceDetails, now: DateTime<Utc>) {
        self.devices = vec![device];
        self.status = DriverStatus::Confirmed;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invited_driver(now: DateTime<Utc>) -> Driver {
        Driver::invite("+14016369040".to_string(), "482913".to_string(), now, 30)
    }

    #[test]
    fn test_invite_sets_code_and_expiration() {
        let now = Utc::now();
        let driver = invited_driver(now);

        assert_eq!(driver.status, DriverStatus::Invited);
        assert_eq!(driver.one_time_code.as_deref(), Some("482913"));
        assert_eq!(driver.one_time_expiration_time, Some(now + Duration::minutes(30)));
        assert!(driver.devices.is_empty());
        assert!(!driver.id.is_empty());
    }

    #[test]
    fn test_code_expiry_is_exclusive() {
        let now = Utc::now();
        let driver = invited_driver(now);
        let expires_at = driver.one_time_expiration_time.unwrap();

        assert!(!driver.is_code_expired(expires_at - Duration::milliseconds(1)));
        assert!(driver.is_code_expired(expires_at));
        assert!(driver.is_code_expired(expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_missing_expiration_counts_as_expired() {
        let now = Utc::now();
        let mut driver = invited_driver(now);
        driver.one_time_expiration_time = None;
        assert!(driver.is_code_expired(now));
    }

    #[test]
    fn test_code_matches_ignores_case() {
        let mut driver = invited_driver(Utc::now());
        assert!(driver.code_matches("482913"));
        assert!(!driver.code_matches("482914"));
        assert!(!driver.code_matches("48291"));
        assert!(!driver.code_matches(""));

        driver.one_time_code = Some("AbC123".to_string());
        assert!(driver.code_matches("abc123"));
        assert!(driver.code_matches("ABC123"));

        driver.one_time_code = None;
        assert!(!driver.code_matches("abc123"));
    }

    #[test]
    fn test_confirm_replaces_devices() {
        let now = Utc::now();
        let mut driver = invited_driver(now);
        driver.devices.push(DeviceDetails::new("old-phone".to_string(), now));

        let device = DeviceDetails::new("pixel-8".to_string(), now);
        driver.confirm(device.clone(), now + Duration::minutes(1));

        assert_eq!(driver.status, DriverStatus::Confirmed);
        assert_eq!(driver.devices, vec![device]);
        assert_eq!(driver.updated_at, now + Duration::minutes(1));
        assert!(!driver.is_invited());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&DriverStatus::Invited).unwrap(), "\"INVITED\"");
        assert_eq!("confirmed".parse::<DriverStatus>().unwrap(), DriverStatus::Confirmed);
        assert!("PENDING".parse::<DriverStatus>().is_err());
    }
}
