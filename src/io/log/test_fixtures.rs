//! Test fixtures for generating synthetic trajectory logs.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::recorder::LogRecorder;
use super::types::LogRecord;
use crate::core::types::{BenchmarkSample, Pose3D, Timestamped};

/// Start time used by all fixtures (1000 s since epoch).
pub const FIXTURE_START_US: u64 = 1_000_000_000;

/// Temporary binary log with synthetic records.
///
/// The temporary directory is removed when the fixture is dropped.
pub struct LogTestFixture {
    temp_dir: TempDir,
    log_path: PathBuf,
}

impl LogTestFixture {
    /// Write `records` to a fresh binary log.
    pub fn from_records(name: &str, records: &[LogRecord]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join(name);

        let mut recorder = LogRecorder::create(&log_path).expect("Failed to create recorder");
        for record in records {
            recorder.record(record).expect("Failed to record");
        }
        recorder.finish().expect("Failed to finish log");

        Self { temp_dir, log_path }
    }

    /// Hover flight over waypoints along X.
    ///
    /// For each waypoint the estimate is published at 10 Hz for one second
    /// and the visual reference at 30 Hz with a constant `offset` subtracted,
    /// followed by one benchmark sample.
    pub fn waypoint_flight(waypoints: &[f64], offset: Pose3D) -> Self {
        let mut records = Vec::new();
        let mut time = FIXTURE_START_US;

        for (i, &x) in waypoints.iter().enumerate() {
            let estimate = Pose3D::new(x, 0.5, 1.0, 0.1);
            let visual = Pose3D::new(
                estimate.x - offset.x,
                estimate.y - offset.y,
                estimate.z - offset.z,
                estimate.rot_z - offset.rot_z,
            );

            for step in 0..30u64 {
                if step % 3 == 0 {
                    records.push(LogRecord::PoseEstimation(Timestamped::new(estimate, time)));
                }
                records.push(LogRecord::PoseVisual(Timestamped::new(visual, time + 1_000)));
                time += 33_333;
            }

            let mut pass1 = vec![0.0; waypoints.len()];
            let mut pass2 = vec![0.0; waypoints.len()];
            pass1[i] = 0.1;
            pass2[i] = 0.2;
            records.push(LogRecord::Benchmark(Timestamped::new(
                BenchmarkSample::new(pass1, pass2),
                time,
            )));
        }

        Self::from_records("waypoints.tlog", &records)
    }

    /// Path to the generated log.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Directory holding the generated log.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::log::source::read_log;

    #[test]
    fn test_waypoint_flight_layout() {
        let fixture = LogTestFixture::waypoint_flight(&[1.0, 2.0], Pose3D::origin());
        let records = read_log(fixture.path()).unwrap();

        let estimates = records.iter().filter(|r| r.as_pose_estimation().is_some()).count();
        let visuals = records.iter().filter(|r| r.as_pose_visual().is_some()).count();
        let benchmarks = records.iter().filter(|r| r.as_benchmark().is_some()).count();

        assert_eq!(estimates, 20);
        assert_eq!(visuals, 60);
        assert_eq!(benchmarks, 2);
        assert!(fixture.dir().exists());
    }
}
