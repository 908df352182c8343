//! Per-bar progress state and point-in-time snapshots.
//!
//! A [`ProgressRecord`] is the registry's internal bookkeeping for one tracked
//! unit of work. Records never leave the registry; the rendering thread and
//! any external observer work from owned [`RecordSnapshot`] values instead,
//! taken while the registry lock is held.
//!
//! `processed` is a plain integer rather than an atomic: every read and write
//! already happens under the registry's single map lock, so an atomic would
//! add nothing but ceremony.

use std::time::{Duration, Instant};

use compact_str::CompactString;

/// Internal state for one tracked unit of work.
///
/// Owned exclusively by the registry's locked map. `name`, `total`, and
/// `start` are reassigned on re-registration of the same id; `processed` and
/// `finished` survive a re-registration.
pub(crate) struct ProgressRecord {
    pub(crate) name: CompactString,
    pub(crate) total: u64,
    pub(crate) processed: u64,
    pub(crate) start: Instant,
    pub(crate) finished: bool,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            name: CompactString::default(),
            total: 0,
            processed: 0,
            start: Instant::now(),
            finished: false,
        }
    }
}

impl ProgressRecord {
    /// Creates a fresh record with a start time of now.
    pub(crate) fn new(name: impl Into<CompactString>, total: u64) -> Self {
        Self {
            name: name.into(),
            total,
            ..Self::default()
        }
    }

    /// Copies the current state into an owned [`RecordSnapshot`].
    ///
    /// `elapsed` is materialized here so the snapshot stays meaningful after
    /// the registry lock is released.
    pub(crate) fn snapshot(&self, id: u32) -> RecordSnapshot {
        RecordSnapshot {
            id,
            name: self.name.clone(),
            total: self.total,
            processed: self.processed,
            finished: self.finished,
            elapsed: self.start.elapsed(),
        }
    }
}

/// A plain-data snapshot of one bar's state at a specific point in time.
///
/// Snapshots hold owned data and require no locking to read. They are what
/// the redraw thread renders from, and what [`ProgressRegistry::snapshot`]
/// hands to external observers.
///
/// [`ProgressRegistry::snapshot`]: crate::ProgressRegistry::snapshot
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordSnapshot {
    id: u32,
    name: CompactString,
    total: u64,
    processed: u64,
    finished: bool,
    elapsed: Duration,
}

impl RecordSnapshot {
    /// Returns the caller-assigned bar id.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expected unit count (0 means indeterminate).
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the processed unit count.
    #[must_use]
    pub const fn processed(&self) -> u64 {
        self.processed
    }

    /// Returns whether the bar was marked finished.
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// Returns the time elapsed since registration, as of the snapshot.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the completion percentage.
    ///
    /// `0.0` when `total` is zero. May exceed `100.0` if the caller reported
    /// `processed > total`; that is a caller contract, not validated here.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProgressRecord;

    /// Percent Math
    /// total == 0 always reads 0%, regardless of processed.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_percent_indeterminate() {
        let mut record = ProgressRecord::new("scan", 0);
        record.processed = 42;

        assert_eq!(record.snapshot(1).percent(), 0.0);
    }

    /// Percent Math
    /// Straightforward ratio for a determinate total.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_percent_determinate() {
        let mut record = ProgressRecord::new("load", 200);
        record.processed = 100;

        assert_eq!(record.snapshot(1).percent(), 50.0);
    }

    /// Percent Math
    /// Over-reporting is passed through rather than clamped.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_percent_over_hundred() {
        let mut record = ProgressRecord::new("load", 100);
        record.processed = 300;

        assert_eq!(record.snapshot(1).percent(), 300.0);
    }

    /// Snapshot Contents
    /// A snapshot carries owned copies of every displayed field.
    #[test]
    fn test_snapshot_fields() {
        let mut record = ProgressRecord::new("checker", 10);
        record.processed = 3;
        record.finished = true;

        let snap = record.snapshot(7);

        assert_eq!(snap.id(), 7);
        assert_eq!(snap.name(), "checker");
        assert_eq!(snap.total(), 10);
        assert_eq!(snap.processed(), 3);
        assert!(snap.finished());
    }
}
