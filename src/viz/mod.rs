//! SVG charts of evaluated logs.

mod chart;

pub use chart::{ChartConfig, ComparisonChart};
