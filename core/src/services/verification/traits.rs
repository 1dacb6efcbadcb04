//! Injected sources of randomness and time

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, Rng};

/// Smallest code issued by [`RandomCodeGenerator`]
pub const CODE_MIN: u32 = 100_000;

/// Largest code issued by [`RandomCodeGenerator`]
pub const CODE_MAX: u32 = 999_999;

/// Source of one-time codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a new code
    fn generate(&self) -> String;
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Six-digit codes drawn uniformly from the OS CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
