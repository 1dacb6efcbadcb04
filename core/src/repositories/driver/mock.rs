//! Mock implementation of DriverRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::driver::{Driver, DriverStatus};
use crate::errors::DomainError;

use super::DriverRepository;

/// In-memory driver repository
pub struct MockDriverRepository {
    drivers: Arc<RwLock<HashMap<String, Driver>>>,
    lookups: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockDriverRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            drivers: Arc::new(RwLock::new(HashMap::new())),
            lookups: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Create a repository pre-populated with `drivers`
    pub fn with_drivers(drivers: impl IntoIterator<Item = Driver>) -> Self {
        let map = drivers.into_iter().map(|d| (d.id.clone(), d)).collect();
        Self {
            drivers: Arc::new(RwLock::new(map)),
            ..Self::new()
        }
    }

    /// Make every subsequent operation fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of `find_by_id` calls served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Snapshot of a stored driver
    pub async fn get(&self, id: &str) -> Option<Driver> {
        self.drivers.read().await.get(id).cloned()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock driver repository error"));
        }
        Ok(())
    }
}

impl Default for MockDriverRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverRepository for MockDriverRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Driver>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.drivers.read().await.get(id).cloned())
    }

    async fn create(&self, driver: Driver) -> Result<Driver, DomainError> {
        self.check_failure()?;
        let mut drivers = self.drivers.write().await;

        if drivers.contains_key(&driver.id) {
            return Err(DomainError::Validation {
                message: format!("Driver {} already exists", driver.id),
            });
        }

        drivers.insert(driver.id.clone(), driver.clone());
        Ok(driver)
    }

    async fn update_if_status(
        &self,
        driver: Driver,
        expected: DriverStatus,
    ) -> Result<Option<Driver>, DomainError> {
        self.check_failure()?;
        let mut drivers = self.drivers.write().await;

        match drivers.get(&driver.id) {
            Some(current) if current.status == expected => {
                drivers.insert(driver.id.clone(), driver.clone());
                Ok(Some(driver))
            }
            _ => Ok(None),
        }
    }
}
