//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    Clock, CodeGenerator, InviteDriver, RandomCodeGenerator, SystemClock, VerificationService,
    VerificationServiceConfig, VerifyCode,
};
