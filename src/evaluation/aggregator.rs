//! Trajectory error aggregation over one log.
//!
//! The estimate stream is split into intervals: a new interval starts
//! whenever the estimated x changes to a new non-zero value. Every visual
//! sample is compared against the latest estimate and its absolute error
//! is added to the current interval. Visual samples are ignored while the
//! latest estimate has x == 0, which includes everything before the first
//! valid estimate.

use std::path::Path;

use serde::Deserialize;

use super::accumulator::{ErrorAccumulator, ErrorAxis, PoseError};
use super::benchmark::BenchmarkTable;
use super::series::TrajectorySeries;
use super::summary::{Evaluation, EvaluationSummary, IntervalStats, LogStats};
use crate::core::types::{Pose3D, Timestamped};
use crate::error::{Error, Result};
use crate::io::log::{LogRecord, RecordSource, open_log};

/// Capacity limits of the accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Estimate intervals tracked before failing
    pub max_intervals: usize,
    /// Benchmark records accepted before failing
    pub max_benchmark_rows: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_intervals: 4,
            max_benchmark_rows: 3,
        }
    }
}

/// Single-pass aggregator for one log.
///
/// # Example
///
/// ```ignore
/// use pariksha::{AggregatorConfig, TrajectoryAggregator};
///
/// let mut aggregator = TrajectoryAggregator::new(AggregatorConfig::default());
/// for record in records {
///     aggregator.observe(&record)?;
/// }
/// let evaluation = aggregator.finish()?;
/// let (dist, rot, ba_time) = evaluation.summary.scalars();
/// ```
#[derive(Debug)]
pub struct TrajectoryAggregator {
    /// Latest estimate, the reference for visual samples
    reference: Pose3D,
    /// Current interval, `None` until the first non-zero estimate
    interval: Option<usize>,
    errors: ErrorAccumulator,
    benchmarks: BenchmarkTable,
    estimate: TrajectorySeries,
    visual: TrajectorySeries,
    stats: LogStats,
}

impl TrajectoryAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            reference: Pose3D::origin(),
            interval: None,
            errors: ErrorAccumulator::new(config.max_intervals),
            benchmarks: BenchmarkTable::new(config.max_benchmark_rows),
            estimate: TrajectorySeries::new(),
            visual: TrajectorySeries::new(),
            stats: LogStats::default(),
        }
    }

    /// Index of the current interval.
    pub fn current_interval(&self) -> Option<usize> {
        self.interval
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }

    /// Feed the next record in arrival order.
    pub fn observe(&mut self, record: &LogRecord) -> Result<()> {
        self.stats.note(record.topic(), record.timestamp_us());

        match record {
            LogRecord::PoseEstimation(estimate) => self.observe_estimate(estimate),
            LogRecord::PoseVisual(visual) => {
                self.observe_visual(visual);
                Ok(())
            }
            LogRecord::Benchmark(sample) => self.benchmarks.push(sample),
        }
    }

    fn observe_estimate(&mut self, estimate: &Timestamped<Pose3D>) -> Result<()> {
        let pose = estimate.data;
        let new_interval = self.reference.x != pose.x && pose.x != 0.0;

        if new_interval {
            let index = self.interval.map_or(0, |i| i + 1);
            self.errors.open_interval(index, estimate.timestamp_us)?;
            self.interval = Some(index);
            log::debug!(
                "Interval {} starts at {:.3} s (x = {})",
                index,
                estimate.secs_since(self.stats.first_timestamp_us.unwrap_or(0)),
                pose.x
            );
        }

        self.reference = pose;
        self.estimate.push(estimate.clone());
        Ok(())
    }

    fn observe_visual(&mut self, visual: &Timestamped<Pose3D>) {
        self.visual.push(visual.clone());

        let matched = self.reference.x != 0.0
            && self.interval.is_some_and(|index| {
                let error = PoseError::between(&self.reference, &visual.data);
                self.errors.add(index, &error)
            });

        if !matched {
            self.stats.excluded_visual += 1;
        }
    }

    /// Record how many lines the reader skipped.
    pub fn set_skipped(&mut self, skipped: u64) {
        self.stats.skipped = skipped;
    }

    /// Finalize the pass into averages and totals.
    ///
    /// Fails with [`Error::NoMatchedSamples`]
    /// when no visual sample was matched to a valid estimate.
    pub fn finish(self) -> Result<Evaluation> {
        let avg_distance_error = self.errors.mean(ErrorAxis::Distance)?;
        let avg_rotation_error = self.errors.mean(ErrorAxis::Rotation)?;
        let avg_x_error = self.errors.mean(ErrorAxis::X)?;
        let avg_y_error = self.errors.mean(ErrorAxis::Y)?;
        let overall_mean_error = self
            .errors
            .overall_mean()
            .ok_or(Error::NoMatchedSamples(ErrorAxis::Distance))?;

        let intervals = self
            .errors
            .cells()
            .iter()
            .enumerate()
            .map(|(i, cell)| IntervalStats::from_cell(i, cell))
            .collect();

        let summary = EvaluationSummary {
            avg_distance_error,
            avg_rotation_error,
            total_benchmark_time: self.benchmarks.total(),
            avg_x_error,
            avg_y_error,
            overall_mean_error,
            matched_samples: self.errors.count(ErrorAxis::Distance),
            benchmark_rows: self.benchmarks.rows().len(),
            benchmark_iterations: self.benchmarks.iterations(),
            intervals,
        };

        Ok(Evaluation {
            summary,
            estimate: self.estimate,
            visual: self.visual,
            stats: self.stats,
        })
    }
}

/// Evaluate records from any source.
pub fn evaluate_source(
    source: &mut dyn RecordSource,
    config: AggregatorConfig,
) -> Result<Evaluation> {
    let mut aggregator = TrajectoryAggregator::new(config);
    while let Some(record) = source.next_record()? {
        aggregator.observe(&record)?;
    }
    aggregator.set_skipped(source.skipped());
    aggregator.finish()
}

/// Evaluate an in-memory record sequence.
pub fn evaluate_records<'a>(
    records: impl IntoIterator<Item = &'a LogRecord>,
    config: AggregatorConfig,
) -> Result<Evaluation> {
    let mut aggregator = TrajectoryAggregator::new(config);
    for record in records {
        aggregator.observe(record)?;
    }
    aggregator.finish()
}

/// Open and evaluate a log file of either encoding.
pub fn evaluate_log(path: impl AsRef<Path>, config: AggregatorConfig) -> Result<Evaluation> {
    let path = path.as_ref();
    log::info!("Evaluating {}", path.display());
    let mut source = open_log(path)?;
    evaluate_source(source.as_mut(), config)
}
