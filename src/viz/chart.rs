//! Estimate vs. reference comparison chart.
//!
//! Four stacked panels share the time axis (seconds since the first record
//! of the log): X, Y, Z and rotZ. Each panel overlays the estimated and the
//! visual series.

use std::path::Path;

use svg::Document;
use svg::node::element::{Group, Line, Polyline, Rectangle, Text};

use crate::core::types::PoseAxis;
use crate::error::Result;
use crate::evaluation::{Evaluation, TrajectorySeries};

/// Colorblind-friendly palette (Okabe-Ito).
mod colors {
    /// Estimated trajectory - blue
    pub const ESTIMATE: &str = "#0072B2";
    /// Visual reference - orange
    pub const REFERENCE: &str = "#E69F00";
    pub const FRAME: &str = "#888888";
    pub const GRID: &str = "#E0E0E0";
    pub const TEXT: &str = "#222222";
}

const TITLE_HEIGHT: f64 = 30.0;
const PANEL_GAP: f64 = 24.0;
const LEGEND_HEIGHT: f64 = 40.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;

/// Chart dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub panel_height: f64,
    pub line_width: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            panel_height: 180.0,
            line_width: 1.5,
        }
    }
}

/// Linear map from data values to pixels.
#[derive(Debug, Clone, Copy)]
struct Scale {
    lo: f64,
    hi: f64,
    px_lo: f64,
    px_hi: f64,
}

impl Scale {
    /// Degenerate ranges are widened so flat series sit mid-panel.
    fn new(lo: f64, hi: f64, px_lo: f64, px_hi: f64) -> Self {
        let (lo, hi) = if (hi - lo).abs() < 1e-9 {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        };
        Self { lo, hi, px_lo, px_hi }
    }

    fn map(&self, v: f64) -> f64 {
        self.px_lo + (v - self.lo) / (self.hi - self.lo) * (self.px_hi - self.px_lo)
    }
}

/// Four-panel comparison chart builder.
///
/// # Example
///
/// ```ignore
/// let chart = ComparisonChart::new(ChartConfig::default()).with_title("run.tlog");
/// chart.save(&evaluation, Path::new("plots/run.svg"))?;
/// ```
pub struct ComparisonChart {
    config: ChartConfig,
    title: Option<String>,
}

impl ComparisonChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            title: None,
        }
    }

    /// Set a title to display above the panels.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Total height of the rendered document.
    pub fn height(&self) -> f64 {
        let panels = PoseAxis::ALL.len() as f64;
        TITLE_HEIGHT + panels * (self.config.panel_height + PANEL_GAP) + LEGEND_HEIGHT
    }

    /// Render the chart for one evaluation.
    pub fn render(&self, evaluation: &Evaluation) -> Document {
        let width = self.config.width;
        let height = self.height();

        let mut doc = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, width, height))
            .add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", "white"),
            );

        if let Some(title) = &self.title {
            doc = doc.add(
                Text::new(title.clone())
                    .set("x", width / 2.0)
                    .set("y", 20)
                    .set("text-anchor", "middle")
                    .set("font-size", 14)
                    .set("font-family", "sans-serif")
                    .set("fill", colors::TEXT),
            );
        }

        let start_us = evaluation.start_time_us();
        let t_max = [&evaluation.estimate, &evaluation.visual]
            .iter()
            .filter_map(|s| s.time_range_us())
            .map(|(_, last)| last.saturating_sub(start_us) as f64 / 1_000_000.0)
            .fold(0.0, f64::max);
        let time_scale = Scale::new(0.0, t_max, MARGIN_LEFT, width - MARGIN_RIGHT);

        for (i, axis) in PoseAxis::ALL.iter().enumerate() {
            let top = TITLE_HEIGHT + i as f64 * (self.config.panel_height + PANEL_GAP);
            doc = doc.add(self.render_panel(*axis, evaluation, start_us, time_scale, top));
        }

        let axis_y = TITLE_HEIGHT
            + PoseAxis::ALL.len() as f64 * (self.config.panel_height + PANEL_GAP)
            - PANEL_GAP
            + 14.0;
        doc = doc.add(self.render_time_labels(time_scale, t_max, axis_y));
        doc.add(self.render_legend(height - LEGEND_HEIGHT / 2.0 + 6.0))
    }

    /// Render and write the chart to `path`, creating parent directories.
    pub fn save(&self, evaluation: &Evaluation, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        svg::save(path, &self.render(evaluation))?;
        log::debug!("Wrote chart {}", path.display());
        Ok(())
    }

    fn render_panel(
        &self,
        axis: PoseAxis,
        evaluation: &Evaluation,
        start_us: u64,
        time_scale: Scale,
        top: f64,
    ) -> Group {
        let bottom = top + self.config.panel_height;
        let left = MARGIN_LEFT;
        let right = self.config.width - MARGIN_RIGHT;

        let (lo, hi) = match (
            evaluation.estimate.value_range(axis),
            evaluation.visual.value_range(axis),
        ) {
            (Some(a), Some(b)) => (a.0.min(b.0), a.1.max(b.1)),
            (Some(r), None) | (None, Some(r)) => r,
            (None, None) => (0.0, 0.0),
        };
        // Larger values are drawn higher up.
        let value_scale = Scale::new(lo, hi, bottom, top);

        let mut group = Group::new()
            .set("id", format!("panel-{}", axis.label()))
            .add(
                Rectangle::new()
                    .set("x", left)
                    .set("y", top)
                    .set("width", right - left)
                    .set("height", self.config.panel_height)
                    .set("fill", "none")
                    .set("stroke", colors::FRAME)
                    .set("stroke-width", 1),
            );

        let mid = value_scale.map((value_scale.lo + value_scale.hi) / 2.0);
        group = group.add(
            Line::new()
                .set("x1", left)
                .set("y1", mid)
                .set("x2", right)
                .set("y2", mid)
                .set("stroke", colors::GRID)
                .set("stroke-dasharray", "4,4"),
        );

        group = group
            .add(panel_text(axis.label(), left + 6.0, top + 14.0, "start", 12))
            .add(panel_text(
                &format!("{:.3}", value_scale.hi),
                left - 6.0,
                top + 10.0,
                "end",
                10,
            ))
            .add(panel_text(
                &format!("{:.3}", value_scale.lo),
                left - 6.0,
                bottom,
                "end",
                10,
            ));

        for (series, color) in [
            (&evaluation.estimate, colors::ESTIMATE),
            (&evaluation.visual, colors::REFERENCE),
        ] {
            if let Some(line) =
                self.series_polyline(series, axis, start_us, time_scale, value_scale, color)
            {
                group = group.add(line);
            }
        }

        group
    }

    fn series_polyline(
        &self,
        series: &TrajectorySeries,
        axis: PoseAxis,
        start_us: u64,
        time_scale: Scale,
        value_scale: Scale,
        color: &str,
    ) -> Option<Polyline> {
        if series.is_empty() {
            return None;
        }

        let points = series
            .axis_points(axis, start_us)
            .iter()
            .map(|(t, v)| format!("{:.2},{:.2}", time_scale.map(*t), value_scale.map(*v)))
            .collect::<Vec<_>>()
            .join(" ");

        Some(
            Polyline::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", color)
                .set("stroke-width", self.config.line_width)
                .set("stroke-linejoin", "round"),
        )
    }

    fn render_time_labels(&self, time_scale: Scale, t_max: f64, y: f64) -> Group {
        Group::new()
            .set("id", "time-axis")
            .add(panel_text("0 s", time_scale.map(0.0), y, "start", 10))
            .add(panel_text(
                &format!("{:.1} s", t_max),
                time_scale.map(t_max),
                y,
                "end",
                10,
            ))
    }

    fn render_legend(&self, y: f64) -> Group {
        let mut group = Group::new().set("id", "legend");
        let mut x = MARGIN_LEFT;

        for (label, color) in [
            ("estimate", colors::ESTIMATE),
            ("visual reference", colors::REFERENCE),
        ] {
            group = group
                .add(
                    Line::new()
                        .set("x1", x)
                        .set("y1", y - 4.0)
                        .set("x2", x + 24.0)
                        .set("y2", y - 4.0)
                        .set("stroke", color)
                        .set("stroke-width", 2.5),
                )
                .add(panel_text(label, x + 30.0, y, "start", 11));
            x += 160.0;
        }

        group
    }
}

fn panel_text(content: &str, x: f64, y: f64, anchor: &str, size: u32) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("font-size", size)
        .set("font-family", "sans-serif")
        .set("fill", colors::TEXT)
}
