//! Deterministic code and clock sources for tests

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

use super::traits::{Clock, CodeGenerator};

/// Hands out the configured codes in order, repeating the last one
pub struct FixedCodeGenerator {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl FixedCodeGenerator {
    /// Always produce `code`
    pub fn new(code: impl Into<String>) -> Self {
        Self::sequence([code.into()])
    }

    /// Produce `codes` one after another
    pub fn sequence(codes: impl IntoIterator<Item = String>) -> Self {
        let codes: VecDeque<String> = codes.into_iter().collect();
        let last = codes.back().cloned().unwrap_or_default();
        Self {
            codes: Mutex::new(codes),
            last: Mutex::new(last),
        }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        match self.codes.lock().unwrap().pop_front() {
            Some(code) => {
                *self.last.lock().unwrap() = code.clone();
                code
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

/// Clock frozen at a settable instant
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap() = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
