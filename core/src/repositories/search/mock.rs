//! Mock implementation of DriverSearchRepository for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::driver::Driver;
use crate::errors::DomainError;

use super::DriverSearchRepository;

/// Records every indexed document
pub struct MockDriverSearchRepository {
    indexed: Arc<Mutex<Vec<Driver>>>,
    should_fail: AtomicBool,
}

impl MockDriverSearchRepository {
    /// Create a new mock index
    pub fn new() -> Self {
        Self {
            indexed: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Mock index that rejects every document
    pub fn failing() -> Self {
        let index = Self::new();
        index.should_fail.store(true, Ordering::SeqCst);
        index
    }

    /// Documents indexed so far, in order
    pub fn indexed(&self) -> Vec<Driver> {
        self.indexed.lock().unwrap().clone()
    }
}

impl Default for MockDriverSearchRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverSearchRepository for MockDriverSearchRepository {
    async fn index(&self, driver: &Driver) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Search index unavailable"));
        }
        self.indexed.lock().unwrap().push(driver.clone());
        Ok(())
    }
}
