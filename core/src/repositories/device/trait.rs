//! Device repository trait.

use async_trait::async_trait;

use crate::domain::entities::device::DeviceDetails;
use crate::errors::DomainError;

/// Repository trait for DeviceDetails persistence
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Persist a new device record and return it as stored
    async fn create(&self, device: DeviceDetails) -> Result<DeviceDetails, DomainError>;

    /// Remove a device record that was never linked to a driver
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
