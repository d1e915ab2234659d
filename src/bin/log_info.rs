//! CLI tool for inspecting trajectory logs.
//!
//! Displays the header (binary logs), per-topic record counts and rates,
//! and the first records of a log.
//!
//! # Usage
//!
//! ```bash
//! log_info flight.tlog
//! log_info --head 10 flight.jsonl
//! ```

use std::path::PathBuf;

use clap::Parser;

use pariksha::io::log::{TopicCounts, detect_format};
use pariksha::{LogFormat, LogPlayer, Topic, open_log};

#[derive(Parser, Debug)]
#[command(author, version, about = "Display information about a trajectory log")]
struct Args {
    /// Log file (binary .tlog or JSON Lines)
    log: PathBuf,

    /// Number of leading records to print
    #[arg(long, default_value = "3")]
    head: usize,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format(&args.log)?;
    let file_size = std::fs::metadata(&args.log)?.len();

    println!("Log File Information");
    println!("====================");
    println!("File: {}", args.log.display());
    println!("Format: {}", format.name());
    println!("Size: {} bytes", file_size);
    println!();

    if format == LogFormat::Binary {
        let player = LogPlayer::open(&args.log)?;
        let header = player.header();
        println!("Header Information:");
        println!("  Format version: {}", header.version);
        println!("  Flags: 0x{:04x}", header.flags);
        println!(
            "  Start time: {} us ({:.3} s)",
            header.start_time_us,
            header.start_time_us as f64 / 1_000_000.0
        );
        println!(
            "  End time: {} us ({:.3} s)",
            header.end_time_us,
            header.end_time_us as f64 / 1_000_000.0
        );
        println!("  Duration: {:.3} seconds", header.duration_secs());
        println!("  Record count (header): {}", header.record_count);
        println!();
    }

    let mut source = open_log(&args.log)?;
    let mut counts = TopicCounts::default();
    let mut first_timestamp: Option<u64> = None;
    let mut last_timestamp = 0u64;

    if args.head > 0 {
        println!("First records:");
    }
    while let Some(record) = source.next_record()? {
        if counts.total() < args.head as u64 {
            println!("  {:>16} us  {:?}", record.timestamp_us(), record);
        }
        counts.add(record.topic());
        first_timestamp.get_or_insert(record.timestamp_us());
        last_timestamp = record.timestamp_us();
    }
    println!();

    let duration_secs = first_timestamp
        .map(|first| last_timestamp.saturating_sub(first) as f64 / 1_000_000.0)
        .unwrap_or(0.0);

    println!("Records:");
    println!("  Total: {}", counts.total());
    for topic in Topic::ALL {
        let count = counts.get(topic);
        let rate = if duration_secs > 0.0 {
            count as f64 / duration_secs
        } else {
            0.0
        };
        println!("  {:<18} {:>8} ({:.1} Hz)", topic.as_str(), count, rate);
    }
    if source.skipped() > 0 {
        println!("  Skipped (other topics): {}", source.skipped());
    }
    println!("  Duration: {:.3} seconds", duration_secs);

    Ok(())
}
