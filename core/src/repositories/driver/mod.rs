//! Driver repository module.

mod r#trait;
pub use r#trait::DriverRepository;

pub mod mock;
pub use mock::MockDriverRepository;
