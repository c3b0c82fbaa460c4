//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

/// Fake clock whose reading is set by the test.
///
/// Clones share the same underlying reading, so a test can keep one clone, hand another
/// to a store and advance time while a recorder is alive.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    now: Arc<Mutex<Duration>>,
}

impl FakePlatform {
    /// Creates a fake clock that reads zero.
    pub(crate) fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Sets the current reading for all clones of this platform.
    pub(crate) fn set_now(&self, now: Duration) {
        *self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned") = now;
    }

    /// Moves the current reading forward by `delta`.
    pub(crate) fn advance(&self, delta: Duration) {
        let mut now = self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned");
        *now = now.saturating_add(delta);
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Duration {
        *self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_time() {
        let platform = FakePlatform::new();
        assert_eq!(platform.now(), Duration::ZERO);
    }

    #[test]
    fn sets_and_advances_time() {
        let platform = FakePlatform::new();

        platform.set_now(Duration::from_micros(150));
        platform.advance(Duration::from_micros(50));

        assert_eq!(platform.now(), Duration::from_micros(200));
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        platform1.set_now(Duration::from_millis(100));
        assert_eq!(platform2.now(), Duration::from_millis(100));

        platform2.advance(Duration::from_millis(5));
        assert_eq!(platform1.now(), Duration::from_millis(105));
    }
}
