use std::path::{Path, PathBuf};

use crate::AggregationStore;

/// Writes a profiling report when dropped.
///
/// Created by [`AggregationStore::dump_on_drop()`]. There is no caller left to return an error
/// to when the guard is dropped, so failures are logged through `tracing` at warning level and
/// otherwise ignored.
#[derive(Debug)]
#[must_use = "The report is written when the guard is dropped"]
pub struct DumpGuard<'a> {
    store: &'a AggregationStore,
    path: PathBuf,
}

impl<'a> DumpGuard<'a> {
    pub(crate) fn new(store: &'a AggregationStore, path: PathBuf) -> Self {
        Self { store, path }
    }

    /// The file the report will be written to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DumpGuard<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.store.dump_report(&self.path) {
            tracing::warn!(%error, "profiling report was not written");
        }
    }
}
