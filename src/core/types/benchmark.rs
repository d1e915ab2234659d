//! Bundle adjustment benchmark samples.

use serde::{Deserialize, Serialize};

/// Benchmark information published by the mapper after a bundle adjustment.
///
/// The pass arrays hold per-pass optimization durations in seconds. A
/// mapper running a single pass reports zeros for pass 1.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BenchmarkSample {
    /// Durations of the first bundle adjustment pass
    #[serde(rename = "BA_times_pass1", alias = "ba_times_pass1")]
    pub ba_times_pass1: Vec<f64>,
    /// Durations of the second bundle adjustment pass
    #[serde(rename = "BA_times_pass2", alias = "ba_times_pass2")]
    pub ba_times_pass2: Vec<f64>,
    /// Solver iterations of the first pass
    #[serde(default)]
    pub num_iter_pass1: u32,
    /// Solver iterations of the second pass
    #[serde(default)]
    pub num_iter_pass2: u32,
    /// Landmarks in the map when the sample was taken
    #[serde(default, rename = "pts_map", alias = "map_points")]
    pub map_points: u32,
    /// Keyframes in the map when the sample was taken
    #[serde(default)]
    pub keyframes: u32,
}

impl BenchmarkSample {
    /// Create a sample carrying only pass durations.
    pub fn new(ba_times_pass1: Vec<f64>, ba_times_pass2: Vec<f64>) -> Self {
        Self {
            ba_times_pass1,
            ba_times_pass2,
            ..Self::default()
        }
    }

    /// Total solver iterations over both passes.
    pub fn total_iterations(&self) -> u64 {
        self.num_iter_pass1 as u64 + self.num_iter_pass2 as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        let sample: BenchmarkSample =
            serde_json::from_str(r#"{"BA_times_pass1":[0.1],"BA_times_pass2":[0.2]}"#).unwrap();

        assert_eq!(sample, BenchmarkSample::new(vec![0.1], vec![0.2]));
        assert_eq!(sample.total_iterations(), 0);
    }

    #[test]
    fn test_total_iterations() {
        let sample = BenchmarkSample {
            num_iter_pass1: 12,
            num_iter_pass2: 30,
            ..BenchmarkSample::default()
        };
        assert_eq!(sample.total_iterations(), 42);
    }
}
