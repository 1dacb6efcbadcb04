pub mod device;
pub mod driver;
pub mod search;

pub use device::{DeviceRepository, MockDeviceRepository};
pub use driver::{DriverRepository, MockDriverRepository};
pub use search::{DriverSearchRepository, MockDriverSearchRepository};
