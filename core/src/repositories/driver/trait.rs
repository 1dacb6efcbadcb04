//! Driver repository trait defining the interface for driver persistence.
//!
//! The trait is async-first and returns `DomainError` for store failures so
//! that callers can propagate them unmodified.

use async_trait::async_trait;

use crate::domain::entities::driver::{Driver, DriverStatus};
use crate::errors::DomainError;

/// Repository trait for Driver entity persistence operations
///
/// Implementations own the driver record together with its device links;
/// `devices` on the returned entity always reflects what is stored.
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Find a driver by identifier
    ///
    /// # Returns
    /// * `Ok(Some(Driver))` - Driver found, with its devices loaded
    /// * `Ok(None)` - No driver with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: &str) -> Result<Option<Driver>, DomainError>;

    /// Persist a new driver
    ///
    /// # Returns
    /// * `Ok(Driver)` - The stored driver
    /// * `Err(DomainError)` - Creation failed (e.g., duplicate ID)
    async fn create(&self, driver: Driver) -> Result<Driver, DomainError>;

    /// Replace the stored driver only if its current status is `expected`
    ///
    /// The status check and the write are a single conditional update, so
    /// of two concurrent callers expecting the same status at most one wins.
    ///
    /// # Returns
    /// * `Ok(Some(Driver))` - The write was applied
    /// * `Ok(None)` - The driver is missing or no longer in `expected`
    /// * `Err(DomainError)` - Database or other error occurred
    async fn update_if_status(
        &self,
        driver: Driver,
        expected: DriverStatus,
    ) -> Result<Option<Driver>, DomainError>;
}
