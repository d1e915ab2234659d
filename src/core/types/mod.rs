//! Core data types carried by trajectory logs.
//!
//! - [`Pose3D`]: Position (x, y, z) plus yaw (`rot_z`)
//! - [`PoseAxis`]: One plottable component of a [`Pose3D`]
//! - [`BenchmarkSample`]: Bundle adjustment timings published by the mapper
//! - [`Timestamped<T>`]: Generic timestamp wrapper

mod benchmark;
mod pose;
mod timestamped;

pub use benchmark::BenchmarkSample;
pub use pose::{Pose3D, PoseAxis};
pub use timestamped::Timestamped;
