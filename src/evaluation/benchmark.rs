//! Bundle adjustment timing table.

use crate::core::types::{BenchmarkSample, Timestamped};
use crate::error::{Error, Result};

/// Table of `[pass1, pass2]` durations, one row per benchmark record.
///
/// Row `k` takes element `k` of the k-th record's pass arrays. A record
/// whose arrays have no element `k` is rejected.
#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    rows: Vec<[f64; 2]>,
    capacity: usize,
    iterations: u64,
}

impl BenchmarkTable {
    /// Create an empty table holding at most `capacity` rows.
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            capacity,
            iterations: 0,
        }
    }

    /// Fill the next row from `record`.
    pub fn push(&mut self, record: &Timestamped<BenchmarkSample>) -> Result<()> {
        let row = self.rows.len();
        if row >= self.capacity {
            return Err(Error::BenchmarkOverflow {
                row,
                capacity: self.capacity,
                timestamp_us: record.timestamp_us,
            });
        }

        let sample = &record.data;
        let pick = |times: &[f64], pass: u8| {
            times.get(row).copied().ok_or(Error::BenchmarkIndex {
                row,
                pass,
                len: times.len(),
                timestamp_us: record.timestamp_us,
            })
        };
        let pass1 = pick(&sample.ba_times_pass1, 1)?;
        let pass2 = pick(&sample.ba_times_pass2, 2)?;

        self.rows.push([pass1, pass2]);
        self.iterations += sample.total_iterations();
        Ok(())
    }

    /// Filled rows in arrival order.
    pub fn rows(&self) -> &[[f64; 2]] {
        &self.rows
    }

    /// Sum of every filled cell, `+0.0` when empty.
    pub fn total(&self) -> f64 {
        self.rows.iter().flatten().fold(0.0, |acc, v| acc + v)
    }

    /// Solver iterations reported by all recorded samples.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}
