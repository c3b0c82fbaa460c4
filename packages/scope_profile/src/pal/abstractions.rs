//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides monotonic wall-clock readings.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current monotonic time, measured from an arbitrary fixed origin.
    ///
    /// Consecutive calls never go backwards.
    fn now(&self) -> Duration;
}
