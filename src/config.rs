//! Configuration file support.
//!
//! All sections and fields are optional; missing values take the defaults
//! below.
//!
//! ```toml
//! [input]
//! data_dir = "."
//! logs = ["result_benchmark_noBA_false_robust_true.bag",
//!         "result_benchmark_noBA_true_robust_true.bag"]
//!
//! [limits]
//! max_intervals = 4
//! max_benchmark_rows = 3
//!
//! [plot]
//! enabled = true
//! output_dir = "plots"
//! width = 900
//! panel_height = 180
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::evaluation::AggregatorConfig;
use crate::viz::ChartConfig;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "pariksha.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub limits: AggregatorConfig,
    pub plot: PlotConfig,
}

/// Which logs to evaluate when none are given on the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory the log names are resolved against
    pub data_dir: PathBuf,
    pub logs: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            logs: vec![
                "result_benchmark_noBA_false_robust_true.bag".to_string(),
                "result_benchmark_noBA_true_robust_true.bag".to_string(),
            ],
        }
    }
}

/// Chart output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub enabled: bool,
    pub output_dir: PathBuf,
    /// Chart width in pixels
    pub width: u32,
    /// Height of each of the four panels in pixels
    pub panel_height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from("plots"),
            width: 900,
            panel_height: 180,
        }
    }
}

impl PlotConfig {
    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            width: f64::from(self.width),
            panel_height: f64::from(self.panel_height),
            ..ChartConfig::default()
        }
    }

    /// `<output_dir>/<log stem>.svg`
    pub fn chart_path(&self, log_path: &Path) -> PathBuf {
        let stem = log_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "log".to_string());
        self.output_dir.join(format!("{}.svg", stem))
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist and parse. Without one,
    /// [`DEFAULT_CONFIG_PATH`] is tried and any problem with it falls back
    /// to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                let config = Self::from_toml(&contents)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if !path.exists() {
                    return Ok(Self::default());
                }
                match fs::read_to_string(path)
                    .map_err(Error::from)
                    .and_then(|contents| Self::from_toml(&contents))
                {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        Ok(config)
                    }
                    Err(e) => {
                        log::warn!("Failed to load config {}: {}", path.display(), e);
                        Ok(Self::default())
                    }
                }
            }
        }
    }

    /// Configured logs resolved against the data directory.
    pub fn log_paths(&self) -> Vec<PathBuf> {
        self.input
            .logs
            .iter()
            .map(|name| self.input.data_dir.join(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.limits.max_intervals, 4);
        assert_eq!(config.limits.max_benchmark_rows, 3);
        assert!(config.plot.enabled);
        assert_eq!(
            config.log_paths(),
            vec![
                PathBuf::from("./result_benchmark_noBA_false_robust_true.bag"),
                PathBuf::from("./result_benchmark_noBA_true_robust_true.bag"),
            ]
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [input]
            data_dir = "/data/flights"

            [limits]
            max_intervals = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.input.data_dir, PathBuf::from("/data/flights"));
        assert_eq!(config.input.logs.len(), 2);
        assert_eq!(config.limits.max_intervals, 8);
        assert_eq!(config.limits.max_benchmark_rows, 3);
        assert_eq!(config.plot, PlotConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[limits]\nmax_intervals = \"four\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("eval.toml");
        fs::write(&path, "[plot]\nenabled = false\nwidth = 1200\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.plot.enabled);
        assert_eq!(config.plot.chart_config().width, 1200.0);
        assert_eq!(config.plot.chart_config().panel_height, 180.0);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(Some(&temp_dir.path().join("missing.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_chart_path_uses_log_stem() {
        let plot = PlotConfig::default();
        assert_eq!(
            plot.chart_path(Path::new("/data/run_a.bag")),
            PathBuf::from("plots/run_a.svg")
        );
    }
}
