//! Search-index mirror for driver documents.

mod r#trait;
pub use r#trait::DriverSearchRepository;

pub mod mock;
pub use mock::MockDriverSearchRepository;
