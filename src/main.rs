//! Pariksha - trajectory error evaluation
//!
//! Evaluates recorded pose logs one after another. For each log it prints
//! the file name, the mean planar distance error, the mean yaw error and the
//! total bundle adjustment time, then writes an SVG chart comparing the
//! estimated and the visual trajectory.
//!
//! # Usage
//!
//! ```bash
//! pariksha                                  # logs from pariksha.toml / defaults
//! pariksha run_a.tlog run_b.jsonl           # explicit logs
//! pariksha --data-dir /data --no-plot
//! pariksha --json --intervals run_a.tlog
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;

use pariksha::{ComparisonChart, Config, Evaluation, evaluate_log};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Logs to evaluate (binary .tlog or JSON Lines); defaults to the configured logs
    logs: Vec<PathBuf>,

    /// Configuration file path (default: pariksha.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the configured log names are resolved against
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Output directory for charts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip chart generation
    #[arg(long)]
    no_plot: bool,

    /// Print the full summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the per-interval error breakdown
    #[arg(long)]
    intervals: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.input.data_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.plot.output_dir = dir;
    }
    if args.no_plot {
        config.plot.enabled = false;
    }

    let logs = if args.logs.is_empty() {
        config.log_paths()
    } else {
        args.logs
    };

    let mut charts = Vec::new();
    for path in &logs {
        let evaluation = evaluate_log(path, config.limits)?;
        report(
            &mut std::io::stdout().lock(),
            path,
            &evaluation,
            args.json,
            args.intervals,
        )?;

        if config.plot.enabled {
            let chart_path = config.plot.chart_path(path);
            ComparisonChart::new(config.plot.chart_config())
                .with_title(display_name(path))
                .save(&evaluation, &chart_path)?;
            charts.push(chart_path);
        }
    }

    for chart in &charts {
        log::info!("Chart: {}", chart.display());
    }

    Ok(())
}

/// Print the result block of one log to `out`.
fn report(
    out: &mut impl Write,
    path: &Path,
    evaluation: &Evaluation,
    json: bool,
    intervals: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = &evaluation.summary;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?;
    } else {
        let (distance, rotation, ba_time) = summary.scalars();
        writeln!(out, "{}", display_name(path))?;
        writeln!(out, "{}", distance)?;
        writeln!(out, "{}", rotation)?;
        writeln!(out, "{}", ba_time)?;
    }

    log::info!(
        "{}: {} matched, {} excluded visual, {} benchmark rows, {:.1}s of data",
        display_name(path),
        summary.matched_samples,
        evaluation.stats.excluded_visual,
        summary.benchmark_rows,
        evaluation.stats.duration_secs()
    );

    if intervals && !json {
        writeln!(out, "Intervals:")?;
        for interval in &summary.intervals {
            writeln!(
                out,
                "  [{}] samples={} x={} y={} distance={} rotation={}",
                interval.index,
                interval.samples,
                fmt_mean(interval.mean_x),
                fmt_mean(interval.mean_y),
                fmt_mean(interval.mean_distance),
                fmt_mean(interval.mean_rotation)
            )?;
        }
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn fmt_mean(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.6}", v))
}
