//! MySQL repository implementations

mod device_repository_impl;
mod driver_repository_impl;

pub use device_repository_impl::MySqlDeviceRepository;
pub use driver_repository_impl::MySqlDriverRepository;
