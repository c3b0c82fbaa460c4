/// Aggregated statistics for one [`LocationKey`](crate::LocationKey).
///
/// Both fields are only ever updated together, under the lock of the owning
/// [`AggregationStore`](crate::AggregationStore).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProfileEntry {
    call_count: u64,
    total_duration_micros: u64,
}

impl ProfileEntry {
    #[cfg(test)]
    pub(crate) fn with_values(call_count: u64, total_duration_micros: u64) -> Self {
        Self {
            call_count,
            total_duration_micros,
        }
    }

    /// Number of completed recordings for the location.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Sum of the measured durations of all recordings, in microseconds.
    #[must_use]
    pub fn total_duration_micros(&self) -> u64 {
        self.total_duration_micros
    }

    /// Mean duration per recording in microseconds, rounded down. Zero if nothing was recorded.
    #[must_use]
    pub fn mean_micros(&self) -> u64 {
        self.total_duration_micros
            .checked_div(self.call_count)
            .unwrap_or_default()
    }

    /// Adds one recording.
    ///
    /// Saturates instead of overflowing: the sampling path must never panic.
    pub(crate) fn add_sample(&mut self, duration_micros: u64) {
        self.call_count = self.call_count.saturating_add(1);
        self.total_duration_micros = self.total_duration_micros.saturating_add(duration_micros);
    }

    /// Folds another entry for the same location into this one.
    pub(crate) fn merge(&mut self, other: &Self) {
        self.call_count = self.call_count.saturating_add(other.call_count);
        self.total_duration_micros = self
            .total_duration_micros
            .saturating_add(other.total_duration_micros);
    }
}
