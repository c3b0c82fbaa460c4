//! Scope timing tokens.

use std::borrow::Cow;
use std::marker::PhantomData;
use std::time::Duration;

use crate::{AggregationStore, LocationKey};

/// Times one execution of a scope and reports it to an [`AggregationStore`] when dropped.
///
/// The start time is captured when the recorder is created. Dropping the recorder adds
/// exactly one sample with the elapsed wall-clock time, whichever way the scope is left:
/// normal fallthrough, early `return`, `?` propagation or panic unwinding.
///
/// Timing is inclusive: nested recorders each report the full time of their own scope.
///
/// The recorder is tied to the thread that created it and cannot be cloned, so a single
/// scope execution can never be reported twice.
///
/// # Examples
///
/// ```
/// use scope_profile::{AggregationStore, LocationKey, ScopedRecorder};
///
/// let store = AggregationStore::new();
/// let key = LocationKey::new(file!(), line!(), "example");
///
/// {
///     let _recorder = ScopedRecorder::new(&store, key.clone());
///     let mut sum = 0_u64;
///     for i in 0..1000 {
///         sum = sum.wrapping_add(i);
///     }
///     std::hint::black_box(sum);
/// } // One sample is recorded here.
///
/// assert_eq!(store.entry(&key).unwrap().call_count(), 1);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct ScopedRecorder<'a> {
    store: &'a AggregationStore,
    key: Cow<'static, LocationKey>,
    start: Duration,

    _single_threaded: PhantomData<*const ()>,
}

impl<'a> ScopedRecorder<'a> {
    /// Starts timing a scope identified by `key`.
    ///
    /// Nothing is written to `store` until the recorder is dropped.
    pub fn new(store: &'a AggregationStore, key: LocationKey) -> Self {
        Self::with_key(store, Cow::Owned(key))
    }

    /// Starts timing a scope identified by a key that outlives the program's use of it.
    ///
    /// This is what [`profile_scope!`](crate::profile_scope) uses: each call site builds its
    /// key once and every later pass through the marker borrows it without allocating.
    pub fn for_static_key(store: &'a AggregationStore, key: &'static LocationKey) -> Self {
        Self::with_key(store, Cow::Borrowed(key))
    }

    fn with_key(store: &'a AggregationStore, key: Cow<'static, LocationKey>) -> Self {
        let start = store.now();

        Self {
            store,
            key,
            start,
            _single_threaded: PhantomData,
        }
    }

    /// The location this recorder reports to.
    #[must_use]
    pub fn key(&self) -> &LocationKey {
        &self.key
    }

    /// Time elapsed since the recorder was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.store.now().saturating_sub(self.start)
    }
}

impl Drop for ScopedRecorder<'_> {
    fn drop(&mut self) {
        self.store.record_duration(&self.key, self.elapsed());
    }
}
