//! End-to-end evaluation of logs written to disk.

use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use tempfile::TempDir;

use pariksha::{
    AggregatorConfig, BenchmarkSample, ChartConfig, ComparisonChart, Config, Error, ErrorAxis,
    JsonlWriter, LogFormat, LogRecord, LogRecorder, Pose3D, Timestamped, evaluate_log, read_log,
};

const FLIGHT_JSONL: &str = r#"
{"timestamp_us": 500, "topic": "/pose_visual", "x": 5.0, "y": 5.0, "z": 1.0, "rotZ": 1.0}
{"timestamp_us": 1000, "topic": "/pose_estimation", "x": 1.0, "y": 0.0, "z": 1.0, "rotZ": 0.1}
{"timestamp_us": 1200, "topic": "/imu", "gyro_z": 0.01}
{"timestamp_us": 1500, "topic": "/pose_visual", "x": 1.2, "y": 0.1, "z": 1.0, "rotZ": 0.0}
{"timestamp_us": 2000, "topic": "/pose_visual", "x": 0.9, "y": 0.0, "z": 1.0, "rotZ": 0.3}
{"timestamp_us": 3000, "topic": "/benchmark", "BA_times_pass1": [0.25, 9.0], "BA_times_pass2": [0.5, 9.0], "num_iter_pass1": 4, "num_iter_pass2": 6}
"#;

fn write_flight(dir: &Path) -> PathBuf {
    let path = dir.join("flight.jsonl");
    fs::write(&path, FLIGHT_JSONL.trim_start()).unwrap();
    path
}

fn est(x: f64, t: u64) -> LogRecord {
    LogRecord::PoseEstimation(Timestamped::new(Pose3D::new(x, 0.0, 1.0, 0.0), t))
}

fn vis(x: f64, t: u64) -> LogRecord {
    LogRecord::PoseVisual(Timestamped::new(Pose3D::new(x, 0.0, 1.0, 0.0), t))
}

fn bench(p1: &[f64], p2: &[f64], t: u64) -> LogRecord {
    LogRecord::Benchmark(Timestamped::new(
        BenchmarkSample::new(p1.to_vec(), p2.to_vec()),
        t,
    ))
}

fn write_binary(dir: &Path, name: &str, records: &[LogRecord]) -> PathBuf {
    let path = dir.join(name);
    let mut recorder = LogRecorder::create(&path).unwrap();
    for record in records {
        recorder.record(record).unwrap();
    }
    recorder.finish().unwrap();
    path
}

#[test]
fn test_jsonl_flight_scalars() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_flight(temp_dir.path());

    let evaluation = evaluate_log(&path, AggregatorConfig::default()).unwrap();
    let (distance, rotation, ba_time) = evaluation.summary.scalars();

    assert_relative_eq!(distance, (0.05f64.sqrt() + 0.1) / 2.0, epsilon = 1e-12);
    assert_relative_eq!(rotation, 0.15, epsilon = 1e-12);
    assert_relative_eq!(ba_time, 0.75, epsilon = 1e-12);

    assert_eq!(evaluation.summary.matched_samples, 2);
    assert_eq!(evaluation.summary.intervals.len(), 1);
    assert_eq!(evaluation.summary.benchmark_iterations, 10);
    assert_eq!(evaluation.stats.excluded_visual, 1);
    assert_eq!(evaluation.stats.skipped, 1);
    assert_eq!(evaluation.estimate.len(), 1);
    assert_eq!(evaluation.visual.len(), 3);
}

#[test]
fn test_binary_copy_evaluates_identically() {
    let temp_dir = TempDir::new().unwrap();
    let jsonl = write_flight(temp_dir.path());

    let records = read_log(&jsonl).unwrap();
    let binary = write_binary(temp_dir.path(), "flight.tlog", &records);
    assert_eq!(read_log(&binary).unwrap(), records);

    let from_jsonl = evaluate_log(&jsonl, AggregatorConfig::default()).unwrap();
    let from_binary = evaluate_log(&binary, AggregatorConfig::default()).unwrap();
    assert_eq!(from_jsonl.summary, from_binary.summary);
}

#[test]
fn test_jsonl_writer_output_is_readable() {
    let temp_dir = TempDir::new().unwrap();
    let records = vec![est(1.0, 10), vis(1.5, 20), bench(&[0.1], &[0.2], 30)];
    let path = temp_dir.path().join("short.jsonl");
    assert_eq!(LogFormat::for_output(&path), LogFormat::JsonLines);

    let mut writer = JsonlWriter::create(&path).unwrap();
    for record in &records {
        writer.record(record).unwrap();
    }
    let info = writer.finish().unwrap();

    assert_eq!(info.record_count, 3);
    assert_eq!(read_log(&path).unwrap(), records);
}

#[test]
fn test_log_without_visual_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_binary(
        temp_dir.path(),
        "blind.tlog",
        &[est(1.0, 10), est(2.0, 20), bench(&[0.1], &[0.2], 30)],
    );

    let result = evaluate_log(&path, AggregatorConfig::default());
    assert!(matches!(result, Err(Error::NoMatchedSamples(ErrorAxis::Distance))));
}

#[test]
fn test_interval_boundaries_across_log() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_binary(
        temp_dir.path(),
        "steps.tlog",
        &[
            est(1.0, 10),
            vis(1.5, 20),
            est(1.0, 30),
            vis(0.5, 40),
            est(2.0, 50),
            vis(2.25, 60),
            est(0.0, 70),
            vis(3.0, 80),
        ],
    );

    let evaluation = evaluate_log(&path, AggregatorConfig::default()).unwrap();
    let intervals = &evaluation.summary.intervals;

    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals[0].samples, 2);
    assert_eq!(intervals[1].samples, 1);
    assert_relative_eq!(intervals[0].mean_distance.unwrap(), 0.5);
    assert_relative_eq!(intervals[1].mean_distance.unwrap(), 0.25);
    assert_eq!(evaluation.stats.excluded_visual, 1);
    assert_relative_eq!(evaluation.summary.avg_distance_error, 1.25 / 3.0);
}

#[test]
fn test_fifth_interval_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let records: Vec<_> = (1..=5).map(|i| est(i as f64, i * 10)).collect();
    let path = write_binary(temp_dir.path(), "five.tlog", &records);

    match evaluate_log(&path, AggregatorConfig::default()) {
        Err(Error::IntervalOverflow {
            index, capacity, ..
        }) => {
            assert_eq!(index, 4);
            assert_eq!(capacity, 4);
        }
        other => panic!("expected interval overflow, got {:?}", other.map(|e| e.summary)),
    }

    let wide = AggregatorConfig {
        max_intervals: 5,
        ..AggregatorConfig::default()
    };
    // Five intervals fit, but nothing was matched.
    assert!(matches!(
        evaluate_log(&path, wide),
        Err(Error::NoMatchedSamples(_))
    ));
}

#[test]
fn test_fourth_benchmark_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let pass = [0.1, 0.1, 0.1, 0.1];
    let path = write_binary(
        temp_dir.path(),
        "bench.tlog",
        &[
            est(1.0, 10),
            vis(1.0, 20),
            bench(&pass, &pass, 30),
            bench(&pass, &pass, 40),
            bench(&pass, &pass, 50),
            bench(&pass, &pass, 60),
        ],
    );

    let result = evaluate_log(&path, AggregatorConfig::default());
    assert!(matches!(
        result,
        Err(Error::BenchmarkOverflow {
            row: 3,
            capacity: 3,
            ..
        })
    ));
}

#[test]
fn test_log_cut_inside_length_prefix_fails() {
    let temp_dir = TempDir::new().unwrap();
    let prefix = write_binary(temp_dir.path(), "prefix.tlog", &[est(1.0, 10), vis(1.5, 20)]);
    let full = write_binary(
        temp_dir.path(),
        "full.tlog",
        &[est(1.0, 10), vis(1.5, 20), vis(3.0, 30)],
    );

    // Keep two bytes of the last record's length prefix.
    let cut = fs::metadata(&prefix).unwrap().len() as usize + 2;
    let mut bytes = fs::read(&full).unwrap();
    bytes.truncate(cut);
    fs::write(&full, &bytes).unwrap();

    assert!(read_log(&full).is_err());
    assert!(matches!(
        evaluate_log(&full, AggregatorConfig::default()),
        Err(Error::Log(_))
    ));
}

#[test]
fn test_missing_log_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = evaluate_log(temp_dir.path().join("absent.tlog"), AggregatorConfig::default());
    assert!(matches!(result, Err(Error::Log(_))));
}

#[test]
fn test_chart_written_for_evaluated_log() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = write_flight(temp_dir.path());
    let evaluation = evaluate_log(&log_path, AggregatorConfig::default()).unwrap();

    let mut config = Config::default();
    config.plot.output_dir = temp_dir.path().join("plots");
    let chart_path = config.plot.chart_path(&log_path);

    ComparisonChart::new(ChartConfig::default())
        .with_title("flight.jsonl")
        .save(&evaluation, &chart_path)
        .unwrap();

    assert_eq!(chart_path, temp_dir.path().join("plots/flight.svg"));
    let svg = fs::read_to_string(&chart_path).unwrap();
    assert!(svg.contains("flight.jsonl"));
    assert_eq!(svg.matches("<polyline").count(), 8);
}
