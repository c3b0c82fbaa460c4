//! Profiling reports.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use crate::{LocationKey, ProfileEntry};

/// Header line that starts every rendered report, including reports with no entries.
pub const REPORT_HEADER: &str = "===== Profiling Report =====";

/// Snapshot of the statistics held by an [`AggregationStore`](crate::AggregationStore).
///
/// Entries are kept in report order: descending total duration, then descending call count,
/// then ascending location key. The rendered form is one header line followed by one line
/// per entry:
///
/// ```text
/// ===== Profiling Report =====
/// a.rs:20:g: 500 us, 1 calls
/// a.rs:10:f: 350 us, 3 calls
/// ```
///
/// A report with no entries renders as the header line alone.
///
/// # Examples
///
/// ```
/// use scope_profile::{AggregationStore, LocationKey};
///
/// let store = AggregationStore::new();
/// store.record_sample(&LocationKey::new("a.rs", 10, "f"), 100);
///
/// let report = store.to_report();
/// assert_eq!(
///     report.to_string(),
///     "===== Profiling Report =====\na.rs:10:f: 100 us, 1 calls\n"
/// );
/// ```
///
/// # Merging reports
///
/// Reports from separate stores can be combined as if every sample had been recorded
/// into one store.
///
/// ```
/// use scope_profile::{AggregationStore, LocationKey, Report};
///
/// let key = LocationKey::new("a.rs", 10, "f");
///
/// let store1 = AggregationStore::new();
/// store1.record_sample(&key, 100);
///
/// let store2 = AggregationStore::new();
/// store2.record_sample(&key, 250);
///
/// let merged = Report::merge(&store1.to_report(), &store2.to_report());
/// let (_, entry) = merged.entries().next().unwrap();
/// assert_eq!(entry.call_count(), 2);
/// assert_eq!(entry.total_duration_micros(), 350);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    entries: Vec<(LocationKey, ProfileEntry)>,
}

impl Report {
    /// Creates a report from a snapshot of store contents, putting it in report order.
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = (LocationKey, ProfileEntry)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();

        entries.sort_by(|(a_key, a), (b_key, b)| {
            b.total_duration_micros()
                .cmp(&a.total_duration_micros())
                .then_with(|| b.call_count().cmp(&a.call_count()))
                .then_with(|| a_key.cmp(b_key))
        });

        Self { entries }
    }

    /// Merges two reports into a new report.
    ///
    /// Entries for the same location have their counts and durations summed.
    #[must_use]
    pub fn merge(a: &Self, b: &Self) -> Self {
        let mut merged: HashMap<LocationKey, ProfileEntry> = a.entries.iter().cloned().collect();

        for (key, b_entry) in &b.entries {
            merged
                .entry(key.clone())
                .and_modify(|a_entry| a_entry.merge(b_entry))
                .or_insert(*b_entry);
        }

        Self::from_entries(merged)
    }

    /// Whether the report holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct locations in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entries in report order.
    ///
    /// # Examples
    ///
    /// ```
    /// use scope_profile::{AggregationStore, LocationKey};
    ///
    /// let store = AggregationStore::new();
    /// store.record_sample(&LocationKey::new("a.rs", 1, "fast"), 5);
    /// store.record_sample(&LocationKey::new("a.rs", 2, "slow"), 500);
    ///
    /// let report = store.to_report();
    /// let keys: Vec<_> = report.entries().map(|(key, _)| key.as_str()).collect();
    /// assert_eq!(keys, ["a.rs:2:slow", "a.rs:1:fast"]);
    /// ```
    pub fn entries(&self) -> impl Iterator<Item = (&LocationKey, &ProfileEntry)> {
        self.entries.iter().map(|(key, entry)| (key, entry))
    }

    /// Writes the rendered report into `writer`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `writer`.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }

    /// Prints the rendered report to stdout.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        print!("{self}");
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_HEADER}")?;

        for (key, entry) in &self.entries {
            writeln!(
                f,
                "{key}: {} us, {} calls",
                entry.total_duration_micros(),
                entry.call_count()
            )?;
        }

        Ok(())
    }
}
