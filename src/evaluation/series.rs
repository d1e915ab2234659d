//! Pose time series kept for plotting.

use crate::core::types::{Pose3D, PoseAxis, Timestamped};

/// All samples of one pose topic in arrival order.
#[derive(Debug, Clone, Default)]
pub struct TrajectorySeries {
    samples: Vec<Timestamped<Pose3D>>,
}

impl TrajectorySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Timestamped<Pose3D>) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Timestamped<Pose3D>] {
        &self.samples
    }

    /// `(seconds since start_us, value)` pairs for one axis.
    pub fn axis_points(&self, axis: PoseAxis, start_us: u64) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.secs_since(start_us), s.data.component(axis)))
            .collect()
    }

    /// Smallest and largest value on `axis`, `None` when empty.
    pub fn value_range(&self, axis: PoseAxis) -> Option<(f64, f64)> {
        self.samples.iter().map(|s| s.data.component(axis)).fold(None, |acc, v| {
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            })
        })
    }

    /// First and last timestamp, `None` when empty.
    pub fn time_range_us(&self) -> Option<(u64, u64)> {
        Some((self.samples.first()?.timestamp_us, self.samples.last()?.timestamp_us))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TrajectorySeries {
        let mut s = TrajectorySeries::new();
        s.push(Timestamped::new(Pose3D::new(1.0, -2.0, 0.5, 0.1), 2_000_000));
        s.push(Timestamped::new(Pose3D::new(3.0, 4.0, 0.7, -0.1), 2_500_000));
        s
    }

    #[test]
    fn test_axis_points_relative_time() {
        let points = series().axis_points(PoseAxis::Y, 1_000_000);
        assert_eq!(points, vec![(1.0, -2.0), (1.5, 4.0)]);
    }

    #[test]
    fn test_ranges() {
        let s = series();
        assert_eq!(s.value_range(PoseAxis::X), Some((1.0, 3.0)));
        assert_eq!(s.value_range(PoseAxis::RotZ), Some((-0.1, 0.1)));
        assert_eq!(s.time_range_us(), Some((2_000_000, 2_500_000)));

        let empty = TrajectorySeries::new();
        assert!(empty.is_empty());
        assert_eq!(empty.value_range(PoseAxis::X), None);
        assert_eq!(empty.time_range_us(), None);
    }
}
