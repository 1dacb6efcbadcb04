//! Mock implementation of DeviceRepository for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::device::DeviceDetails;
use crate::errors::DomainError;

use super::DeviceRepository;

/// In-memory device repository
pub struct MockDeviceRepository {
    devices: Arc<Mutex<Vec<DeviceDetails>>>,
    should_fail: AtomicBool,
}

impl MockDeviceRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            devices: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Devices currently stored, in creation order
    pub fn stored(&self) -> Vec<DeviceDetails> {
        self.devices.lock().unwrap().clone()
    }
}

impl Default for MockDeviceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceRepository for MockDeviceRepository {
    async fn create(&self, device: DeviceDetails) -> Result<DeviceDetails, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock device repository error"));
        }
        self.devices.lock().unwrap().push(device.clone());
        Ok(device)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock device repository error"));
        }
        self.devices.lock().unwrap().retain(|device| device.id != id);
        Ok(())
    }
}
