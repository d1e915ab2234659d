//! Convert trajectory logs between binary and JSON Lines.
//!
//! The input encoding is detected from the file contents; the output
//! encoding follows the output extension (`.jsonl`/`.json` for JSON Lines,
//! anything else binary).
//!
//! # Usage
//!
//! ```bash
//! log_convert flight.jsonl flight.tlog
//! log_convert flight.tlog flight.jsonl
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use pariksha::{JsonlWriter, LogFormat, LogInfo, LogRecorder, open_log};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert a trajectory log between encodings")]
struct Args {
    /// Log to read (binary or JSON Lines)
    input: PathBuf,

    /// Log to write; the extension selects the encoding
    output: PathBuf,
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
    let mut source = open_log(&args.input)?;
    let output_format = LogFormat::for_output(&args.output);

    log::info!(
        "Converting {} ({}) -> {} ({})",
        args.input.display(),
        source.format().name(),
        args.output.display(),
        output_format.name()
    );

    let info: LogInfo = match output_format {
        LogFormat::Binary => {
            let mut recorder = LogRecorder::create(&args.output)?;
            while let Some(record) = source.next_record()? {
                recorder.record(&record)?;
            }
            recorder.finish()?
        }
        LogFormat::JsonLines => {
            let mut writer = JsonlWriter::create(&args.output)?;
            while let Some(record) = source.next_record()? {
                writer.record(&record)?;
            }
            writer.finish()?
        }
    };

    if source.skipped() > 0 {
        log::warn!("Dropped {} records on other topics", source.skipped());
    }

    println!("Wrote {}", info.path.display());
    println!("  Records: {}", info.record_count);
    println!("  Duration: {:.3} seconds", info.duration_secs());
    println!("  Size: {} bytes", info.file_size_bytes);

    Ok(())
}
