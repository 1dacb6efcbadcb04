//! Search mirror trait.

use async_trait::async_trait;

use crate::domain::entities::driver::Driver;
use crate::errors::DomainError;

/// Denormalized, non-authoritative copy of drivers kept for querying
///
/// Callers treat failures as best-effort: the primary store stays the
/// source of truth and is never rolled back when indexing fails.
#[async_trait]
pub trait DriverSearchRepository: Send + Sync {
    /// Insert or replace the document for `driver`
    async fn index(&self, driver: &Driver) -> Result<(), DomainError>;
}
