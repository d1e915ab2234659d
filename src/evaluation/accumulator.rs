//! Per-interval absolute error accumulation.

use serde::Serialize;
use std::fmt;

use crate::core::types::Pose3D;
use crate::error::{Error, Result};

/// Error axes tracked per interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorAxis {
    /// Absolute X difference
    X,
    /// Absolute Y difference
    Y,
    /// Planar (XY) distance
    Distance,
    /// Absolute yaw difference
    Rotation,
}

impl ErrorAxis {
    /// All axes in accumulator row order.
    pub const ALL: [ErrorAxis; 4] = [
        ErrorAxis::X,
        ErrorAxis::Y,
        ErrorAxis::Distance,
        ErrorAxis::Rotation,
    ];

    /// Row of this axis in the accumulator.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            ErrorAxis::X => 0,
            ErrorAxis::Y => 1,
            ErrorAxis::Distance => 2,
            ErrorAxis::Rotation => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorAxis::X => "x",
            ErrorAxis::Y => "y",
            ErrorAxis::Distance => "distance",
            ErrorAxis::Rotation => "rotation",
        }
    }
}

impl fmt::Display for ErrorAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signed error between a reference estimate and a visual sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseError {
    pub x: f64,
    pub y: f64,
    pub distance: f64,
    pub rotation: f64,
}

impl PoseError {
    /// Error of `visual` relative to `reference` (`reference - visual`).
    pub fn between(reference: &Pose3D, visual: &Pose3D) -> Self {
        let (x, y) = reference.planar_offset(visual);
        Self {
            x,
            y,
            distance: reference.planar_distance(visual),
            rotation: reference.rot_z - visual.rot_z,
        }
    }

    #[inline]
    pub fn component(&self, axis: ErrorAxis) -> f64 {
        match axis {
            ErrorAxis::X => self.x,
            ErrorAxis::Y => self.y,
            ErrorAxis::Distance => self.distance,
            ErrorAxis::Rotation => self.rotation,
        }
    }
}

/// Running sums for one interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntervalCell {
    /// Sum of absolute errors per axis
    pub sums: [f64; 4],
    /// Samples contributing to each axis
    pub counts: [u64; 4],
}

impl IntervalCell {
    /// Mean absolute error on `axis`, `None` without samples.
    pub fn mean(&self, axis: ErrorAxis) -> Option<f64> {
        let count = self.counts[axis.index()];
        (count > 0).then(|| self.sums[axis.index()] / count as f64)
    }
}

/// Absolute error sums and sample counts, bucketed by interval.
///
/// Capacity is fixed at construction; opening an interval past it fails
/// instead of dropping or merging samples.
#[derive(Debug, Clone)]
pub struct ErrorAccumulator {
    cells: Vec<IntervalCell>,
    capacity: usize,
}

impl ErrorAccumulator {
    /// Create an empty accumulator holding at most `capacity` intervals.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of intervals opened so far.
    pub fn interval_count(&self) -> usize {
        self.cells.len()
    }

    /// Make interval `index` available for accumulation.
    pub fn open_interval(&mut self, index: usize, timestamp_us: u64) -> Result<()> {
        if index >= self.capacity {
            return Err(Error::IntervalOverflow {
                index,
                capacity: self.capacity,
                timestamp_us,
            });
        }
        if self.cells.len() <= index {
            self.cells.resize(index + 1, IntervalCell::default());
        }
        Ok(())
    }

    /// Add the absolute value of every error component to `interval`.
    ///
    /// Returns `false` if the interval was never opened.
    pub fn add(&mut self, interval: usize, error: &PoseError) -> bool {
        let Some(cell) = self.cells.get_mut(interval) else {
            return false;
        };
        for axis in ErrorAxis::ALL {
            cell.sums[axis.index()] += error.component(axis).abs();
            cell.counts[axis.index()] += 1;
        }
        true
    }

    /// All opened intervals in order.
    pub fn cells(&self) -> &[IntervalCell] {
        &self.cells
    }

    /// Sum of absolute errors on `axis` over all intervals.
    pub fn sum(&self, axis: ErrorAxis) -> f64 {
        self.cells
            .iter()
            .fold(0.0, |acc, c| acc + c.sums[axis.index()])
    }

    /// Samples on `axis` over all intervals.
    pub fn count(&self, axis: ErrorAxis) -> u64 {
        self.cells.iter().map(|c| c.counts[axis.index()]).sum()
    }

    /// Mean absolute error on `axis` over all intervals.
    pub fn mean(&self, axis: ErrorAxis) -> Result<f64> {
        let count = self.count(axis);
        if count == 0 {
            return Err(Error::NoMatchedSamples(axis));
        }
        Ok(self.sum(axis) / count as f64)
    }

    /// Sum of every axis divided by the sum of every count.
    pub fn overall_mean(&self) -> Option<f64> {
        let total: f64 = ErrorAxis::ALL.iter().map(|a| self.sum(*a)).sum();
        let count: u64 = ErrorAxis::ALL.iter().map(|a| self.count(*a)).sum();
        (count > 0).then(|| total / count as f64)
    }
}
