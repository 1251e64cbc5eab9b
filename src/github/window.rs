//! Alert time window.

use chrono::{DateTime, TimeDelta, Utc};

/// Window of interest ending at the moment an invocation starts.
///
/// The cutoff is computed once and never moves, so a long scan compares
/// every page against the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    cutoff: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the last `hours` hours before now.
    #[must_use]
    pub fn trailing_hours(hours: u64) -> Self {
        Self::ending_at(Utc::now(), hours)
    }

    /// Window covering the `hours` hours before `now`.
    ///
    /// Windows reaching past the representable range start at the earliest
    /// representable instant.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>, hours: u64) -> Self {
        let cutoff = i64::try_from(hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { cutoff }
    }

    /// Earliest creation time, inclusive, that falls inside the window.
    #[must_use]
    pub const fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    /// Returns true when `created_at` is at or after the cutoff.
    #[must_use]
    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        created_at >= self.cutoff
    }
}
