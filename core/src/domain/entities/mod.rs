//! Domain entities representing core business objects.

pub mod device;
pub mod driver;

// Re-export commonly used types
pub use device::{DeviceDetails, MAX_DEVICE_ID_LENGTH};
pub use driver::{Driver, DriverStatus};
