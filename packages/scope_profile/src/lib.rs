#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Call counting and wall-clock timing of instrumented scopes, aggregated per source location.
//!
//! Put a [`profile_scope!`] marker at the top of a function or block. Every time the scope runs,
//! the marker records one call and the time spent until the scope exits. Samples for the same
//! source location accumulate in an [`AggregationStore`] for the lifetime of the process and
//! can be written out as a report at any time.
//!
//! The core functionality includes:
//! - [`AggregationStore`] - Thread-safe table of statistics keyed by source location
//! - [`ScopedRecorder`] - Times one scope execution and reports it exactly once when dropped
//! - [`LocationKey`] - Identifies a call site as `<file>:<line>:<function>`
//! - [`Report`] - Sorted snapshot of a store, printable and mergeable
//! - [`DumpGuard`] - Writes a report when dropped, for flushing at program exit
//!
//! This package is meant as a development tool, not as production telemetry.
//!
//! # Simple usage
//!
//! ```
//! use scope_profile::{AggregationStore, profile_scope};
//!
//! fn parse_header(input: &str) -> usize {
//!     profile_scope!();
//!     input.lines().take_while(|line| !line.is_empty()).count()
//! }
//!
//! # let dir = tempfile::tempdir().unwrap();
//! # let report_path = dir.path().join("profile.txt");
//! {
//!     // Writes the report when main ends.
//!     let _dump = AggregationStore::global().dump_on_drop(&report_path);
//!
//!     for _ in 0..10 {
//!         parse_header("a: 1\nb: 2\n\nbody");
//!     }
//! }
//! ```
//!
//! The report lists one line per call site, slowest first:
//!
//! ```text
//! ===== Profiling Report =====
//! src/main.rs:4:parse_header: 37 us, 10 calls
//! ```
//!
//! Timing is inclusive: a scope's total includes the time spent in instrumented scopes it
//! calls. Recursive calls record one sample per activation into the same entry.
//!
//! # Isolated stores
//!
//! The markers use the process-wide [`AggregationStore::global()`] by default. Any other store
//! can be passed explicitly, which keeps tests independent of each other:
//!
//! ```
//! use scope_profile::{AggregationStore, profile_scope};
//!
//! fn step(store: &AggregationStore) {
//!     profile_scope!(store);
//! }
//!
//! let store = AggregationStore::new();
//! step(&store);
//! step(&store);
//!
//! # #[cfg(feature = "enabled")]
//! assert_eq!(store.to_report().entries().next().unwrap().1.call_count(), 2);
//! ```
//!
//! # Threading
//!
//! All threads may record into the same store at once. A single mutex protects the table and
//! every sample updates the call count and total duration of its entry together. A
//! [`ScopedRecorder`] itself is bound to the thread that created it.
//!
//! # Features
//!
//! - `enabled` (default) - markers record samples. Without it, markers expand to nothing and
//!   no data is collected.
//! - `coverage` - markers count calls only, without reading the clock.

mod dump_guard;
mod entry;
mod error;
mod location;
mod macros;
mod pal;
mod recorder;
mod report;
mod store;

pub use dump_guard::DumpGuard;
pub use entry::ProfileEntry;
pub use error::Error;
pub use location::LocationKey;
pub use recorder::ScopedRecorder;
pub use report::{REPORT_HEADER, Report};
pub use store::AggregationStore;

#[doc(hidden)]
pub mod __private {
    pub use crate::location::function_name_from_type_name;
}
