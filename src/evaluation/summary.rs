//! Evaluation results.

use serde::Serialize;

use super::accumulator::{ErrorAxis, IntervalCell};
use super::series::TrajectorySeries;
use crate::io::log::{Topic, TopicCounts};

/// Mean absolute errors of one interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalStats {
    /// Interval index, starting at 0
    pub index: usize,
    /// Visual samples matched in this interval
    pub samples: u64,
    pub mean_x: Option<f64>,
    pub mean_y: Option<f64>,
    pub mean_distance: Option<f64>,
    pub mean_rotation: Option<f64>,
}

impl IntervalStats {
    pub(crate) fn from_cell(index: usize, cell: &IntervalCell) -> Self {
        Self {
            index,
            samples: cell.counts[ErrorAxis::Distance.index()],
            mean_x: cell.mean(ErrorAxis::X),
            mean_y: cell.mean(ErrorAxis::Y),
            mean_distance: cell.mean(ErrorAxis::Distance),
            mean_rotation: cell.mean(ErrorAxis::Rotation),
        }
    }
}

/// Scalar results of one evaluated log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    /// Mean planar distance between estimate and reference
    pub avg_distance_error: f64,
    /// Mean absolute yaw difference
    pub avg_rotation_error: f64,
    /// Sum of all recorded bundle adjustment durations
    pub total_benchmark_time: f64,
    pub avg_x_error: f64,
    pub avg_y_error: f64,
    /// All four error axes pooled together
    pub overall_mean_error: f64,
    /// Visual samples matched to an estimate
    pub matched_samples: u64,
    /// Benchmark rows filled
    pub benchmark_rows: usize,
    /// Solver iterations reported by the benchmark records
    pub benchmark_iterations: u64,
    pub intervals: Vec<IntervalStats>,
}

impl EvaluationSummary {
    /// `(avg_distance_error, avg_rotation_error, total_benchmark_time)`
    pub fn scalars(&self) -> (f64, f64, f64) {
        (
            self.avg_distance_error,
            self.avg_rotation_error,
            self.total_benchmark_time,
        )
    }
}

/// What was seen while scanning a log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogStats {
    /// Records per topic
    pub topics: TopicCounts,
    /// Visual records seen before any valid estimate (or while x was 0)
    pub excluded_visual: u64,
    /// Records skipped by the reader (topics not evaluated)
    pub skipped: u64,
    pub first_timestamp_us: Option<u64>,
    pub last_timestamp_us: Option<u64>,
}

impl LogStats {
    pub(crate) fn note(&mut self, topic: Topic, timestamp_us: u64) {
        self.topics.add(topic);
        self.first_timestamp_us.get_or_insert(timestamp_us);
        self.last_timestamp_us = Some(timestamp_us);
    }

    /// Time covered by the log in seconds.
    pub fn duration_secs(&self) -> f64 {
        match (self.first_timestamp_us, self.last_timestamp_us) {
            (Some(first), Some(last)) => last.saturating_sub(first) as f64 / 1_000_000.0,
            _ => 0.0,
        }
    }
}

/// Full result of evaluating one log.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub summary: EvaluationSummary,
    /// Every `/pose_estimation` sample
    pub estimate: TrajectorySeries,
    /// Every `/pose_visual` sample
    pub visual: TrajectorySeries,
    pub stats: LogStats,
}

impl Evaluation {
    /// Timestamp all plotted times are relative to.
    pub fn start_time_us(&self) -> u64 {
        self.stats.first_timestamp_us.unwrap_or(0)
    }
}
