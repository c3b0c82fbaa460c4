//! Platform abstraction layer for the monotonic clock.
//!
//! Recorders read time through this layer so that tests can substitute a fake clock
//! and observe exact durations instead of whatever the real clock happens to report.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
