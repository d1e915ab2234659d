//! Error types for Pariksha

use thiserror::Error;

use crate::evaluation::ErrorAxis;
use crate::io::log::LogError;

/// Pariksha error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Log error: {0}")]
    Log(#[from] LogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An estimate started more intervals than the accumulator holds.
    #[error(
        "Interval overflow at {timestamp_us} us: estimate started interval {index} but only {capacity} intervals are tracked"
    )]
    IntervalOverflow {
        index: usize,
        capacity: usize,
        timestamp_us: u64,
    },

    /// More benchmark records arrived than the benchmark table holds.
    #[error("Benchmark overflow at {timestamp_us} us: row {row} exceeds table of {capacity} rows")]
    BenchmarkOverflow {
        row: usize,
        capacity: usize,
        timestamp_us: u64,
    },

    /// A benchmark record's pass array has no entry at the current row.
    #[error("Benchmark record at {timestamp_us} us has {len} pass-{pass} times, no entry for row {row}")]
    BenchmarkIndex {
        row: usize,
        pass: u8,
        len: usize,
        timestamp_us: u64,
    },

    /// No visual record was matched to a valid estimate.
    #[error("No matched samples for {0} error: average is undefined")]
    NoMatchedSamples(ErrorAxis),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
