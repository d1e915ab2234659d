//! Generic timestamp wrapper.

use serde::{Deserialize, Serialize};

/// Generic timestamp wrapper for any record payload.
///
/// Timestamps are in microseconds since epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestamped<T> {
    /// The wrapped data
    pub data: T,
    /// Timestamp in microseconds since epoch
    pub timestamp_us: u64,
}

impl<T> Timestamped<T> {
    /// Create a new timestamped value.
    #[inline]
    pub fn new(data: T, timestamp_us: u64) -> Self {
        Self { data, timestamp_us }
    }

    /// Map the inner data while preserving timestamp.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Timestamped<U> {
        Timestamped {
            data: f(self.data),
            timestamp_us: self.timestamp_us,
        }
    }

    /// Seconds elapsed since `start_us`, saturating at zero.
    #[inline]
    pub fn secs_since(&self, start_us: u64) -> f64 {
        self.timestamp_us.saturating_sub(start_us) as f64 / 1_000_000.0
    }
}
