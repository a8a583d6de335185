use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters for one cycle. Logged and returned, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub creators_checked: usize,
    pub new_posts: usize,
    pub errors: usize,
    /// Creators whose current post was adopted as a silent baseline.
    pub skipped: usize,
    pub notifications_failed: usize,
    pub state_saved: bool,
    pub elapsed_ms: u64,
}

impl RunStats {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            creators_checked: 0,
            new_posts: 0,
            errors: 0,
            skipped: 0,
            notifications_failed: 0,
            state_saved: false,
            elapsed_ms: 0,
        }
    }

    /// `true` when `errors` is strictly greater than `ratio` of the
    /// creators checked. An empty cycle never exceeds.
    #[must_use]
    pub fn failure_rate_exceeded(&self, ratio: f64) -> bool {
        if self.creators_checked == 0 {
            return false;
        }
        #[allow(clippy::cast_precision_loss)]
        let (errors, total) = (self.errors as f64, self.creators_checked as f64);
        errors > ratio * total
    }
}
