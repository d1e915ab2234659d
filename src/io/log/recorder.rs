//! Binary log recorder.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::error::{LogError, Result};
use super::types::{
    HEADER_SIZE, LOG_MAGIC, LOG_VERSION, LogHeader, LogInfo, LogRecord, MAX_RECORD_SIZE, TopicCounts,
};
use crate::core::types::{BenchmarkSample, Pose3D, Timestamped};

/// Binary log recorder.
///
/// Writes records to a binary log using Postcard serialization with
/// length-prefixed framing.
///
/// # Example
///
/// ```ignore
/// use pariksha::io::log::LogRecorder;
/// use pariksha::{Pose3D, Timestamped};
///
/// let mut recorder = LogRecorder::create("run.tlog")?;
/// recorder.record_pose_estimation(&Timestamped::new(Pose3D::new(1.0, 0.0, 1.2, 0.0), 0))?;
/// let info = recorder.finish()?;
/// println!("Recorded {} records", info.record_count);
/// ```
pub struct LogRecorder {
    writer: BufWriter<File>,
    path: PathBuf,
    record_count: u64,
    topics: TopicCounts,
    start_time_us: Option<u64>,
    end_time_us: u64,
}

impl LogRecorder {
    /// Create a new recorder writing to the specified path.
    ///
    /// Header space is reserved immediately; `finish()` writes the final
    /// header and closes the file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(&[0u8; HEADER_SIZE])?;

        Ok(Self {
            writer,
            path,
            record_count: 0,
            topics: TopicCounts::default(),
            start_time_us: None,
            end_time_us: 0,
        })
    }

    /// Record an estimated pose.
    pub fn record_pose_estimation(&mut self, pose: &Timestamped<Pose3D>) -> Result<()> {
        self.record(&LogRecord::PoseEstimation(pose.clone()))
    }

    /// Record a reference pose.
    pub fn record_pose_visual(&mut self, pose: &Timestamped<Pose3D>) -> Result<()> {
        self.record(&LogRecord::PoseVisual(pose.clone()))
    }

    /// Record a benchmark sample.
    pub fn record_benchmark(&mut self, sample: &Timestamped<BenchmarkSample>) -> Result<()> {
        self.record(&LogRecord::Benchmark(sample.clone()))
    }

    /// Record any log record.
    ///
    /// Records larger than [`MAX_RECORD_SIZE`] are rejected and nothing is
    /// written.
    pub fn record(&mut self, record: &LogRecord) -> Result<()> {
        let bytes =
            postcard::to_allocvec(record).map_err(|e| LogError::Serialize(e.to_string()))?;
        if bytes.len() > MAX_RECORD_SIZE {
            return Err(LogError::RecordTooLarge(bytes.len()));
        }

        let timestamp = record.timestamp_us();
        if self.start_time_us.is_none() {
            self.start_time_us = Some(timestamp);
        }
        self.end_time_us = timestamp;

        let len = bytes.len() as u32;
        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;

        self.record_count += 1;
        self.topics.add(record.topic());
        Ok(())
    }

    /// Get current record count.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Get current recording duration in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.end_time_us
            .saturating_sub(self.start_time_us.unwrap_or(0))
    }

    /// Finalize and close the log, returning file info.
    pub fn finish(mut self) -> Result<LogInfo> {
        self.writer.flush()?;
        let file_size = self.writer.stream_position()?;

        self.writer.seek(SeekFrom::Start(0))?;

        let header = LogHeader {
            magic: LOG_MAGIC,
            version: LOG_VERSION,
            flags: 0,
            start_time_us: self.start_time_us.unwrap_or(0),
            end_time_us: self.end_time_us,
            record_count: self.record_count,
            reserved: [0; 24],
        };

        let header_bytes =
            postcard::to_allocvec(&header).map_err(|e| LogError::Serialize(e.to_string()))?;
        let mut header_buffer = [0u8; HEADER_SIZE];
        let copy_len = header_bytes.len().min(HEADER_SIZE);
        header_buffer[..copy_len].copy_from_slice(&header_bytes[..copy_len]);
        self.writer.write_all(&header_buffer)?;
        self.writer.flush()?;

        let duration_us = self.duration_us();

        Ok(LogInfo {
            path: self.path,
            duration_us,
            record_count: self.record_count,
            file_size_bytes: file_size,
            topics: self.topics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_recorder_create_and_finish() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.tlog");

        let recorder = LogRecorder::create(&path).unwrap();
        let info = recorder.finish().unwrap();

        assert_eq!(info.record_count, 0);
        assert_eq!(fs::metadata(&path).unwrap().len(), HEADER_SIZE as u64);
    }

    #[test]
    fn test_recorder_mixed_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mixed.tlog");

        let mut recorder = LogRecorder::create(&path).unwrap();
        recorder
            .record_pose_estimation(&Timestamped::new(Pose3D::new(1.0, 0.0, 1.0, 0.0), 1000))
            .unwrap();
        recorder
            .record_pose_visual(&Timestamped::new(Pose3D::new(1.1, 0.0, 1.0, 0.0), 2000))
            .unwrap();
        recorder
            .record_pose_visual(&Timestamped::new(Pose3D::new(0.9, 0.0, 1.0, 0.0), 3000))
            .unwrap();
        recorder
            .record_benchmark(&Timestamped::new(
                BenchmarkSample::new(vec![0.1], vec![0.2]),
                4000,
            ))
            .unwrap();

        let info = recorder.finish().unwrap();

        assert_eq!(info.record_count, 4);
        assert_eq!(info.topics.pose_estimation, 1);
        assert_eq!(info.topics.pose_visual, 2);
        assert_eq!(info.topics.benchmark, 1);
        assert_eq!(info.duration_us, 3000);
        assert!(info.file_size_bytes > HEADER_SIZE as u64);
    }

    #[test]
    fn test_recorder_rejects_oversized_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.tlog");

        let mut recorder = LogRecorder::create(&path).unwrap();
        recorder
            .record_pose_estimation(&Timestamped::new(Pose3D::new(1.0, 0.0, 1.0, 0.0), 1000))
            .unwrap();

        // 8 bytes per f64, so this is just past the limit.
        let times = vec![0.1; MAX_RECORD_SIZE / 8 + 1];
        let result = recorder.record_benchmark(&Timestamped::new(
            BenchmarkSample::new(times, Vec::new()),
            2000,
        ));
        assert!(matches!(result, Err(LogError::RecordTooLarge(len)) if len > MAX_RECORD_SIZE));
        assert_eq!(recorder.record_count(), 1);

        let info = recorder.finish().unwrap();
        assert_eq!(info.duration_us, 0);

        let records = crate::io::log::read_log(&path).unwrap();
        assert_eq!(records.len(), 1);
    }
}
