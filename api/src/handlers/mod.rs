pub mod error;

pub use error::{handle_domain_error, handle_validation_errors, json_error_handler};
