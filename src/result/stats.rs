//! Status counts folded from child results.

use super::Status;

/// Counts of child results by final [`Status`].
///
/// `undefined` is tracked separately from `failed` so a report can
/// distinguish "broken" from "not yet implemented".
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of passed children.
    pub passed: usize,

    /// Number of failed children.
    pub failed: usize,

    /// Number of skipped children.
    pub skipped: usize,

    /// Number of children with undefined steps.
    pub undefined: usize,
}

impl Stats {
    /// Creates a new [`Stats`] with all counts at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
            skipped: 0,
            undefined: 0,
        }
    }

    /// Folds an iterator of statuses into counts.
    pub fn from_statuses(statuses: impl IntoIterator<Item = Status>) -> Self {
        let mut stats = Self::new();
        for status in statuses {
            stats.record(status);
        }
        stats
    }

    /// Increments the count for the given [`Status`].
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::Skipped => self.skipped += 1,
            Status::Undefined => self.undefined += 1,
        }
    }

    /// Returns the total number of counted children.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.undefined
    }

    /// Returns `true` if any child failed or was undefined.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0 || self.undefined > 0
    }

    /// Returns `true` if all counts are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
