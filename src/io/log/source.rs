//! Record sources and log format detection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::Result;
use super::jsonl::JsonlReader;
use super::player::LogPlayer;
use super::types::{LOG_MAGIC, LogRecord};

/// On-disk encoding of a trajectory log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Length-prefixed Postcard records behind a `TLOG` header
    Binary,
    /// One JSON object per line
    JsonLines,
}

impl LogFormat {
    /// Pick the format to write based on the file extension.
    ///
    /// `.jsonl` and `.json` select JSON Lines, anything else binary.
    pub fn for_output(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("json") => LogFormat::JsonLines,
            _ => LogFormat::Binary,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LogFormat::Binary => "binary",
            LogFormat::JsonLines => "json-lines",
        }
    }
}

/// A front-to-back stream of log records.
///
/// Implemented by every log reader so the evaluator does not care how the
/// log was encoded.
pub trait RecordSource {
    /// Read the next record, or `None` at end of the log.
    fn next_record(&mut self) -> Result<Option<LogRecord>>;

    /// Encoding of the underlying log.
    fn format(&self) -> LogFormat;

    /// Records skipped so far because their topic is not evaluated.
    fn skipped(&self) -> u64 {
        0
    }
}

/// Detect the encoding of an existing log by its magic bytes.
pub fn detect_format(path: impl AsRef<Path>) -> Result<LogFormat> {
    let mut magic = [0u8; 4];
    let mut file = File::open(path)?;
    let mut filled = 0;
    while filled < magic.len() {
        let n = file.read(&mut magic[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    if filled == magic.len() && magic == LOG_MAGIC {
        Ok(LogFormat::Binary)
    } else {
        Ok(LogFormat::JsonLines)
    }
}

/// Open a log of either encoding.
pub fn open_log(path: impl AsRef<Path>) -> Result<Box<dyn RecordSource>> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    log::debug!("Opening {} as {} log", path.display(), format.name());

    Ok(match format {
        LogFormat::Binary => Box::new(LogPlayer::open(path)?),
        LogFormat::JsonLines => Box::new(JsonlReader::open(path)?),
    })
}

/// Iterate over the remaining records of a source.
pub fn records(source: &mut dyn RecordSource) -> impl Iterator<Item = Result<LogRecord>> + '_ {
    std::iter::from_fn(move || source.next_record().transpose())
}

/// Read a whole log into memory.
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<LogRecord>> {
    let mut source = open_log(path)?;
    let all = records(source.as_mut()).collect::<Result<Vec<_>>>()?;
    Ok(all)
}
