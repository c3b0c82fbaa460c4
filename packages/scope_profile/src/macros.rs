//! Instrumentation markers.
//!
//! Each marker has one definition per feature combination. The choice is made when this crate
//! is compiled, so the features of `scope_profile` decide what the markers expand to in every
//! crate that uses them.

/// Times the rest of the enclosing scope and records it under the current source location.
///
/// The location key is built from `file!()`, `line!()` and the enclosing function name.
/// Without arguments the sample goes to [`AggregationStore::global()`](crate::AggregationStore::global);
/// pass a `&AggregationStore` to record somewhere else.
///
/// Several markers may appear in one scope; each gets its own hidden binding.
///
/// The location key of each marker is built on its first execution and reused afterwards.
///
/// With the `coverage` feature the marker counts the call immediately and does not read the
/// clock. Without the `enabled` feature the marker expands to nothing.
///
/// # Examples
///
/// ```
/// use scope_profile::{AggregationStore, profile_scope};
///
/// fn checksum(store: &AggregationStore, data: &[u8]) -> u32 {
///     profile_scope!(store);
///     data.iter().map(|&b| u32::from(b)).sum()
/// }
///
/// let store = AggregationStore::new();
/// checksum(&store, b"abc");
/// checksum(&store, b"def");
///
/// # #[cfg(feature = "enabled")]
/// # {
/// let report = store.to_report();
/// let (key, entry) = report.entries().next().unwrap();
/// assert!(key.as_str().ends_with(":checksum"));
/// assert_eq!(entry.call_count(), 2);
/// # }
/// ```
#[cfg(all(feature = "enabled", not(feature = "coverage")))]
#[macro_export]
macro_rules! profile_scope {
    () => {
        $crate::profile_scope!($crate::AggregationStore::global());
    };
    ($store:expr) => {
        let _scope_profile_recorder =
            $crate::ScopedRecorder::for_static_key($store, $crate::__call_site_key!());
    };
}

/// Times the rest of the enclosing scope and records it under the current source location.
///
/// Built with the `coverage` feature: the call is counted immediately with zero duration.
#[cfg(all(feature = "enabled", feature = "coverage"))]
#[macro_export]
macro_rules! profile_scope {
    () => {
        $crate::profile_scope!($crate::AggregationStore::global());
    };
    ($store:expr) => {
        $crate::AggregationStore::record_call($store, $crate::__call_site_key!());
    };
}

/// Times the rest of the enclosing scope and records it under the current source location.
///
/// Built without the `enabled` feature: expands to nothing.
#[cfg(not(feature = "enabled"))]
#[macro_export]
macro_rules! profile_scope {
    () => {};
    ($store:expr) => {};
}

/// Expands to a `&'static LocationKey` for the invocation site, built on first use.
#[doc(hidden)]
#[macro_export]
macro_rules! __call_site_key {
    () => {{
        static KEY: ::std::sync::OnceLock<$crate::LocationKey> = ::std::sync::OnceLock::new();
        KEY.get_or_init(|| {
            $crate::LocationKey::new(::std::file!(), ::std::line!(), $crate::function_name!())
        })
    }};
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::AggregationStore;

    fn instrumented(store: &AggregationStore) -> u32 {
        crate::profile_scope!(store);
        42
    }

    #[test]
    #[cfg(feature = "enabled")]
    fn key_names_file_line_and_function() {
        let store = AggregationStore::new();
        instrumented(&store);

        let report = store.to_report();
        let (key, entry) = report.entries().next().unwrap();

        assert!(key.as_str().starts_with(concat!(file!(), ":")));
        assert!(key.as_str().ends_with(":instrumented"));
        assert_eq!(entry.call_count(), 1);
    }

    #[test]
    #[cfg(feature = "enabled")]
    fn repeated_calls_share_one_entry() {
        let store = AggregationStore::new();
        for _ in 0..3 {
            instrumented(&store);
        }

        assert_eq!(store.len(), 1);
        let report = store.to_report();
        assert_eq!(report.entries().next().unwrap().1.call_count(), 3);
    }

    #[test]
    #[cfg(feature = "enabled")]
    fn two_markers_in_one_scope_are_distinct() {
        use crate::LocationKey;

        let store = AggregationStore::new();

        {
            crate::profile_scope!(&store);
            crate::profile_scope!(&store);
        }

        let first_line = line!() - 4;
        let first = LocationKey::new(file!(), first_line, crate::function_name!());
        let second = LocationKey::new(file!(), first_line + 1, crate::function_name!());

        assert_eq!(store.len(), 2);
        assert_eq!(store.entry(&first).unwrap().call_count(), 1);
        assert_eq!(store.entry(&second).unwrap().call_count(), 1);
    }

    #[test]
    fn call_site_key_is_built_once_per_site() {
        fn site() -> &'static crate::LocationKey {
            crate::__call_site_key!()
        }

        let first = site();
        let second = site();

        assert!(std::ptr::eq(first, second));
        assert!(first.as_str().ends_with(":site"));
    }

    #[test]
    #[cfg(feature = "enabled")]
    fn marker_inside_generic_function_names_it() {
        fn generic<T: Default>(store: &AggregationStore) -> T {
            crate::profile_scope!(store);
            T::default()
        }

        let store = AggregationStore::new();
        let _: u32 = generic(&store);
        let _: String = generic(&store);

        assert_eq!(store.len(), 1);
        let report = store.to_report();
        let (key, entry) = report.entries().next().unwrap();
        assert!(key.as_str().ends_with(":generic"));
        assert_eq!(entry.call_count(), 2);
    }

    #[test]
    #[cfg(not(feature = "enabled"))]
    fn disabled_markers_record_nothing() {
        let store = AggregationStore::new();
        instrumented(&store);

        assert!(store.is_empty());
    }

    #[test]
    #[cfg(all(feature = "enabled", feature = "coverage"))]
    fn coverage_markers_count_without_time() {
        let store = AggregationStore::new();
        instrumented(&store);

        let report = store.to_report();
        let (_, entry) = report.entries().next().unwrap();
        assert_eq!(entry.total_duration_micros(), 0);
    }
}
