use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::pal::{Platform, PlatformFacade};
use crate::{DumpGuard, Error, LocationKey, ProfileEntry, Report, ScopedRecorder};

static GLOBAL: LazyLock<AggregationStore> = LazyLock::new(AggregationStore::new);

/// Thread-safe table of per-location call counts and durations.
///
/// Every update and every snapshot takes the same lock, so each [`ProfileEntry`] is always
/// observed with its call count and total duration in agreement.
///
/// The markers ([`profile_scope!`](crate::profile_scope)) record into the process-wide
/// instance returned by [`global()`](Self::global) unless given a store explicitly.
/// Independent stores can be created with [`new()`](Self::new), which is mostly useful
/// in tests and for libraries that want to keep their own statistics apart.
///
/// # Examples
///
/// ```
/// use scope_profile::{AggregationStore, LocationKey};
///
/// let store = AggregationStore::new();
/// let key = LocationKey::new("a.rs", 10, "f");
///
/// store.record_sample(&key, 100);
/// store.record_sample(&key, 200);
///
/// let entry = store.entry(&key).unwrap();
/// assert_eq!(entry.call_count(), 2);
/// assert_eq!(entry.total_duration_micros(), 300);
/// ```
#[derive(Debug)]
pub struct AggregationStore {
    entries: Mutex<HashMap<LocationKey, ProfileEntry>>,
    platform: PlatformFacade,
}

impl AggregationStore {
    /// Creates an empty store that is independent of the process-wide one.
    #[expect(
        clippy::new_without_default,
        reason = "to avoid ambiguity with the notion of a 'default store' that is actually the global store"
    )]
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(PlatformFacade::real())
    }

    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            platform,
        }
    }

    /// Returns the process-wide store, creating it on first use.
    ///
    /// The store lives until the process exits.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Adds one sample of `duration_micros` to the entry for `key`.
    ///
    /// The entry is created with zeroed statistics if this is the first sample for `key`.
    /// Counters saturate at `u64::MAX` rather than overflow.
    pub fn record_sample(&self, key: &LocationKey, duration_micros: u64) {
        let mut entries = self.lock();

        if let Some(entry) = entries.get_mut(key) {
            entry.add_sample(duration_micros);
        } else {
            let mut entry = ProfileEntry::default();
            entry.add_sample(duration_micros);
            entries.insert(key.clone(), entry);
        }
    }

    /// Adds one sample, truncating `duration` to whole microseconds.
    pub fn record_duration(&self, key: &LocationKey, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.record_sample(key, micros);
    }

    /// Counts one call to `key` without attributing any time to it.
    pub fn record_call(&self, key: &LocationKey) {
        self.record_sample(key, 0);
    }

    /// Starts timing the current scope under `key`.
    ///
    /// The returned recorder adds exactly one sample to this store when dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_profile::{AggregationStore, LocationKey};
    ///
    /// let store = AggregationStore::new();
    /// let key = LocationKey::new("a.rs", 1, "work");
    ///
    /// {
    ///     let _recorder = store.recorder(key.clone());
    ///     std::hint::black_box(42);
    /// }
    ///
    /// assert_eq!(store.entry(&key).unwrap().call_count(), 1);
    /// ```
    pub fn recorder(&self, key: LocationKey) -> ScopedRecorder<'_> {
        ScopedRecorder::new(self, key)
    }

    /// Returns a copy of the statistics currently held for `key`.
    #[must_use]
    pub fn entry(&self, key: &LocationKey) -> Option<ProfileEntry> {
        self.lock().get(key).copied()
    }

    /// Number of distinct locations with at least one sample.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no samples have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Takes a consistent snapshot of all entries.
    #[must_use]
    pub fn to_report(&self) -> Report {
        let snapshot: Vec<_> = self
            .lock()
            .iter()
            .map(|(key, entry)| (key.clone(), *entry))
            .collect();

        Report::from_entries(snapshot)
    }

    /// Writes a report of the current statistics to the file at `path`, replacing it.
    ///
    /// An empty store produces a file containing only the report header.
    ///
    /// The snapshot is taken under the lock; the file is written after the lock is released,
    /// so slow storage does not stall recorders. The report is rendered into a temporary file
    /// next to `path` and moved over `path` only once it is complete, so a failed dump leaves
    /// any previous report in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OpenDestination`] if the file cannot be created or cannot replace the
    /// existing `path`, and [`Error::WriteDestination`] if rendering the report into it fails.
    /// The store and any existing file at `path` are left untouched in either case.
    pub fn dump_report(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let report = self.to_report();

        replace_file(path, |writer| report.write_to(writer))?;

        tracing::debug!(
            path = %path.display(),
            entries = report.len(),
            "profiling report written"
        );

        Ok(())
    }

    /// Returns a guard that writes the report to `path` when dropped.
    ///
    /// Hold the guard in `main` to flush the statistics as the program exits.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_profile::AggregationStore;
    ///
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let path = dir.path().join("profile.txt");
    /// {
    ///     let _dump = AggregationStore::global().dump_on_drop(&path);
    ///     // ... the rest of main ...
    /// }
    ///
    /// assert!(path.exists());
    /// ```
    pub fn dump_on_drop(&self, path: impl Into<PathBuf>) -> DumpGuard<'_> {
        DumpGuard::new(self, path.into())
    }

    pub(crate) fn now(&self) -> Duration {
        self.platform.now()
    }

    // Every mutation updates an entry in a single call, so a panic elsewhere while the lock
    // was held cannot leave a half-updated entry behind. Recovering from poison keeps the
    // sampling path free of panics.
    fn lock(&self) -> MutexGuard<'_, HashMap<LocationKey, ProfileEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Replaces the file at `path` with whatever `write` produces, or leaves it alone on failure.
fn replace_file(path: &Path, write: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> Result<()> {
    let open_error = |source: io::Error| Error::OpenDestination {
        path: path.to_path_buf(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(directory).map_err(open_error)?;

    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        write(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|source| Error::WriteDestination {
                path: path.to_path_buf(),
                source,
            })?;
    }

    // On any early return above, dropping `temp_file` deletes it.
    temp_file
        .persist(path)
        .map_err(|persist_error| open_error(persist_error.error))?;

    Ok(())
}

impl fmt::Display for AggregationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_report())
    }
}
