//! Trajectory error evaluation.
//!
//! Compares the estimated pose stream of a log against its visual
//! reference and totals the bundle adjustment time.
//!
//! - [`aggregator`]: single-pass [`TrajectoryAggregator`]
//! - [`accumulator`]: per-interval absolute error sums
//! - [`benchmark`]: bundle adjustment timing table
//! - [`series`]: pose time series kept for plotting
//! - [`summary`]: result types

pub mod accumulator;
pub mod aggregator;
pub mod benchmark;
pub mod series;
pub mod summary;

pub use accumulator::{ErrorAccumulator, ErrorAxis, IntervalCell, PoseError};
pub use aggregator::{
    AggregatorConfig, TrajectoryAggregator, evaluate_log, evaluate_records, evaluate_source,
};
pub use benchmark::BenchmarkTable;
pub use series::TrajectorySeries;
pub use summary::{Evaluation, EvaluationSummary, IntervalStats, LogStats};
