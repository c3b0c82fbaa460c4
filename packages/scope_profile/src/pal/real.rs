use std::time::{Duration, Instant};

use crate::pal::Platform;

/// Monotonic clock backed by [`Instant`].
#[derive(Clone, Debug)]
pub(crate) struct RealPlatform {
    origin: Instant,
}

impl RealPlatform {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Platform for RealPlatform {
    #[cfg_attr(test, mutants::skip)] // Real clock readings cannot be asserted exactly.
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
