//! Core data types for trajectory log files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::types::{BenchmarkSample, Pose3D, Timestamped};

/// Magic bytes at start of a binary log file.
pub const LOG_MAGIC: [u8; 4] = *b"TLOG";

/// Current binary log format version.
pub const LOG_VERSION: u16 = 1;

/// Size of the binary log header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Largest record payload accepted by the reader.
pub const MAX_RECORD_SIZE: usize = 10_000_000;

/// Topic carrying the estimated pose.
pub const TOPIC_POSE_ESTIMATION: &str = "/pose_estimation";

/// Topic carrying the reference (visual) pose.
pub const TOPIC_POSE_VISUAL: &str = "/pose_visual";

/// Topic carrying bundle adjustment benchmark samples.
pub const TOPIC_BENCHMARK: &str = "/benchmark";

/// Binary log header (64 bytes fixed size).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogHeader {
    /// Magic bytes: "TLOG"
    pub magic: [u8; 4],
    /// File format version
    pub version: u16,
    /// Feature flags (none defined yet)
    pub flags: u16,
    /// Timestamp of first record (microseconds since epoch)
    pub start_time_us: u64,
    /// Timestamp of last record (microseconds since epoch)
    pub end_time_us: u64,
    /// Total number of records in the file
    pub record_count: u64,
    /// Reserved for future use
    pub reserved: [u8; 24],
}

impl LogHeader {
    /// Create a new header with default values.
    pub fn new() -> Self {
        Self {
            magic: LOG_MAGIC,
            version: LOG_VERSION,
            flags: 0,
            start_time_us: 0,
            end_time_us: 0,
            record_count: 0,
            reserved: [0; 24],
        }
    }

    /// Check if magic bytes are valid.
    pub fn is_valid(&self) -> bool {
        self.magic == LOG_MAGIC
    }

    /// Get recording duration in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.end_time_us.saturating_sub(self.start_time_us)
    }

    /// Get recording duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_us() as f64 / 1_000_000.0
    }
}

impl Default for LogHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// The three topics understood by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    PoseEstimation,
    PoseVisual,
    Benchmark,
}

impl Topic {
    /// All known topics.
    pub const ALL: [Topic; 3] = [Topic::PoseEstimation, Topic::PoseVisual, Topic::Benchmark];

    /// Topic name as it appears in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::PoseEstimation => TOPIC_POSE_ESTIMATION,
            Topic::PoseVisual => TOPIC_POSE_VISUAL,
            Topic::Benchmark => TOPIC_BENCHMARK,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TOPIC_POSE_ESTIMATION => Ok(Topic::PoseEstimation),
            TOPIC_POSE_VISUAL => Ok(Topic::PoseVisual),
            TOPIC_BENCHMARK => Ok(Topic::Benchmark),
            other => Err(format!("unknown topic: {}", other)),
        }
    }
}

/// Record types stored in trajectory logs.
///
/// Each variant corresponds to one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogRecord {
    /// Estimated pose from the system under test
    PoseEstimation(Timestamped<Pose3D>),
    /// Reference pose from the visual ground-truth source
    PoseVisual(Timestamped<Pose3D>),
    /// Bundle adjustment timings
    Benchmark(Timestamped<BenchmarkSample>),
}

impl LogRecord {
    /// Get the timestamp of this record in microseconds.
    pub fn timestamp_us(&self) -> u64 {
        match self {
            LogRecord::PoseEstimation(rec) => rec.timestamp_us,
            LogRecord::PoseVisual(rec) => rec.timestamp_us,
            LogRecord::Benchmark(rec) => rec.timestamp_us,
        }
    }

    /// Topic this record was published on.
    pub fn topic(&self) -> Topic {
        match self {
            LogRecord::PoseEstimation(_) => Topic::PoseEstimation,
            LogRecord::PoseVisual(_) => Topic::PoseVisual,
            LogRecord::Benchmark(_) => Topic::Benchmark,
        }
    }

    /// Get as estimated pose if this is that type.
    pub fn as_pose_estimation(&self) -> Option<&Timestamped<Pose3D>> {
        match self {
            LogRecord::PoseEstimation(rec) => Some(rec),
            _ => None,
        }
    }

    /// Get as visual pose if this is that type.
    pub fn as_pose_visual(&self) -> Option<&Timestamped<Pose3D>> {
        match self {
            LogRecord::PoseVisual(rec) => Some(rec),
            _ => None,
        }
    }

    /// Get as benchmark sample if this is that type.
    pub fn as_benchmark(&self) -> Option<&Timestamped<BenchmarkSample>> {
        match self {
            LogRecord::Benchmark(rec) => Some(rec),
            _ => None,
        }
    }
}

/// Per-topic record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TopicCounts {
    pub pose_estimation: u64,
    pub pose_visual: u64,
    pub benchmark: u64,
}

impl TopicCounts {
    /// Count one record on `topic`.
    pub fn add(&mut self, topic: Topic) {
        match topic {
            Topic::PoseEstimation => self.pose_estimation += 1,
            Topic::PoseVisual => self.pose_visual += 1,
            Topic::Benchmark => self.benchmark += 1,
        }
    }

    /// Count for a single topic.
    pub fn get(&self, topic: Topic) -> u64 {
        match topic {
            Topic::PoseEstimation => self.pose_estimation,
            Topic::PoseVisual => self.pose_visual,
            Topic::Benchmark => self.benchmark,
        }
    }

    /// Sum over all topics.
    pub fn total(&self) -> u64 {
        self.pose_estimation + self.pose_visual + self.benchmark
    }
}

/// Information about a written log file.
#[derive(Debug, Clone)]
pub struct LogInfo {
    /// Path to the log file
    pub path: PathBuf,
    /// Recording duration in microseconds
    pub duration_us: u64,
    /// Total number of records
    pub record_count: u64,
    /// File size in bytes
    pub file_size_bytes: u64,
    /// Records per topic
    pub topics: TopicCounts,
}

impl LogInfo {
    /// Get recording duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_us as f64 / 1_000_000.0
    }

    /// Get average record rate in Hz.
    pub fn record_rate_hz(&self) -> f64 {
        if self.duration_us == 0 {
            0.0
        } else {
            self.record_count as f64 / self.duration_secs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_header_new() {
        let header = LogHeader::new();
        assert!(header.is_valid());
        assert_eq!(header.version, LOG_VERSION);
        assert_eq!(header.record_count, 0);
    }

    #[test]
    fn test_log_header_fits_reserved_space() {
        let header = LogHeader {
            start_time_us: u64::MAX,
            end_time_us: u64::MAX,
            record_count: u64::MAX,
            ..LogHeader::new()
        };
        let bytes = postcard::to_allocvec(&header).unwrap();
        assert!(bytes.len() <= HEADER_SIZE);
    }

    #[test]
    fn test_log_header_duration() {
        let mut header = LogHeader::new();
        header.start_time_us = 1_000_000;
        header.end_time_us = 6_000_000;

        assert_eq!(header.duration_us(), 5_000_000);
        assert!((header.duration_secs() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_topic_names() {
        for topic in Topic::ALL {
            assert_eq!(topic.as_str().parse::<Topic>().unwrap(), topic);
        }
        assert!("/cmd_vel".parse::<Topic>().is_err());
    }

    #[test]
    fn test_record_accessors() {
        let est = LogRecord::PoseEstimation(Timestamped::new(Pose3D::origin(), 10));
        assert_eq!(est.topic(), Topic::PoseEstimation);
        assert_eq!(est.timestamp_us(), 10);
        assert!(est.as_pose_estimation().is_some());
        assert!(est.as_pose_visual().is_none());

        let bench = LogRecord::Benchmark(Timestamped::new(BenchmarkSample::default(), 20));
        assert_eq!(bench.topic(), Topic::Benchmark);
        assert!(bench.as_benchmark().is_some());
    }

    #[test]
    fn test_topic_counts() {
        let mut counts = TopicCounts::default();
        counts.add(Topic::PoseVisual);
        counts.add(Topic::PoseVisual);
        counts.add(Topic::Benchmark);

        assert_eq!(counts.get(Topic::PoseVisual), 2);
        assert_eq!(counts.get(Topic::PoseEstimation), 0);
        assert_eq!(counts.total(), 3);
    }
}
