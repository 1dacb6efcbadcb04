//! Device repository module.

mod r#trait;
pub use r#trait::DeviceRepository;

pub mod mock;
pub use mock::MockDeviceRepository;
