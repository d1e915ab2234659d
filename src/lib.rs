//! Pariksha - trajectory error evaluation for recorded pose logs
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   main / bin/                       │  ← Executables
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                 config, viz/                        │  ← Settings, charts
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  evaluation/                        │  ← Aggregation
//! │        (intervals, errors, benchmark table)         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Log formats
//! │             (binary .tlog, JSON Lines)              │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │         (Pose3D, BenchmarkSample, Timestamped)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! A log carries three topics: `/pose_estimation` (the estimator output),
//! `/pose_visual` (the visual reference) and `/benchmark` (bundle adjustment
//! timings). One pass over a log yields the mean planar distance error, the
//! mean yaw error and the total bundle adjustment time.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;
pub mod error;

// ============================================================================
// Layer 2: Log formats (depends on core)
// ============================================================================
pub mod io;

// ============================================================================
// Layer 3: Evaluation (depends on core, io)
// ============================================================================
pub mod evaluation;

// ============================================================================
// Layer 4: Settings and charts (depends on all layers)
// ============================================================================
pub mod config;
pub mod viz;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use error::{Error, Result};

// Core types
pub use core::types::{BenchmarkSample, Pose3D, PoseAxis, Timestamped};

// Evaluation
pub use evaluation::{
    AggregatorConfig, ErrorAxis, Evaluation, EvaluationSummary, IntervalStats, LogStats,
    TrajectoryAggregator, evaluate_log, evaluate_records, evaluate_source,
};

// I/O
pub use io::log::{
    JsonlReader, JsonlWriter, LogError, LogFormat, LogInfo, LogPlayer, LogRecord, LogRecorder,
    RecordSource, Topic, open_log, read_log,
};

// Settings and charts
pub use config::{Config, InputConfig, PlotConfig};
pub use viz::{ChartConfig, ComparisonChart};
