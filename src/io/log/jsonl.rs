//! JSON Lines trajectory logs.
//!
//! One record per line:
//!
//! ```text
//! {"timestamp_us": 1000, "topic": "/pose_estimation", "x": 1.0, "y": 0.0, "z": 1.2, "rotZ": 0.1}
//! {"timestamp_us": 1500, "topic": "/pose_visual", "x": 0.98, "y": 0.01, "z": 1.19, "rotZ": 0.12}
//! {"timestamp_us": 9000, "topic": "/benchmark", "BA_times_pass1": [0.2], "BA_times_pass2": [0.3]}
//! ```
//!
//! Lines on other topics are skipped; a known topic with a payload of the
//! wrong shape is an error.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{LogError, Result};
use super::source::{LogFormat, RecordSource};
use super::types::{LogInfo, LogRecord, Topic, TopicCounts};
use crate::core::types::Timestamped;

/// Sequential reader for JSON Lines logs.
pub struct JsonlReader<R> {
    reader: R,
    line_number: usize,
    skipped: u64,
    buffer: Vec<u8>,
}

impl JsonlReader<BufReader<File>> {
    /// Open a JSON Lines log.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> JsonlReader<R> {
    /// Wrap any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            skipped: 0,
            buffer: Vec::new(),
        }
    }

    /// Number of lines skipped because their topic is not evaluated.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Read the next record on a known topic, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<LogRecord>> {
        loop {
            self.buffer.clear();
            if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = std::str::from_utf8(&self.buffer)
                .map_err(|e| LogError::MalformedLine {
                    line: self.line_number,
                    reason: format!("invalid UTF-8: {}", e),
                })?
                .trim();
            if line.is_empty() {
                continue;
            }

            match parse_line(line).map_err(|reason| LogError::MalformedLine {
                line: self.line_number,
                reason,
            })? {
                Some(record) => return Ok(Some(record)),
                None => self.skipped += 1,
            }
        }
    }
}

/// Parse one line. `Ok(None)` means the topic is not one we evaluate.
fn parse_line(line: &str) -> std::result::Result<Option<LogRecord>, String> {
    let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;

    let topic_name = value
        .get("topic")
        .and_then(Value::as_str)
        .ok_or("missing string field `topic`")?;
    let topic = match topic_name.parse::<Topic>() {
        Ok(topic) => topic,
        Err(_) => {
            log::debug!("Skipping record on topic {}", topic_name);
            return Ok(None);
        }
    };

    let timestamp_us = value
        .get("timestamp_us")
        .and_then(Value::as_u64)
        .ok_or("missing unsigned field `timestamp_us`")?;

    let record = match topic {
        Topic::PoseEstimation => LogRecord::PoseEstimation(payload(value, timestamp_us, topic)?),
        Topic::PoseVisual => LogRecord::PoseVisual(payload(value, timestamp_us, topic)?),
        Topic::Benchmark => LogRecord::Benchmark(payload(value, timestamp_us, topic)?),
    };
    Ok(Some(record))
}

fn payload<T: DeserializeOwned>(
    value: Value,
    timestamp_us: u64,
    topic: Topic,
) -> std::result::Result<Timestamped<T>, String> {
    serde_json::from_value(value)
        .map(|data| Timestamped::new(data, timestamp_us))
        .map_err(|e| format!("bad {} payload: {}", topic, e))
}

impl<R: BufRead> RecordSource for JsonlReader<R> {
    fn next_record(&mut self) -> Result<Option<LogRecord>> {
        JsonlReader::next_record(self)
    }

    fn format(&self) -> LogFormat {
        LogFormat::JsonLines
    }

    fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Writer for JSON Lines logs.
pub struct JsonlWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    topics: TopicCounts,
    start_time_us: Option<u64>,
    end_time_us: u64,
}

impl JsonlWriter {
    /// Create a JSON Lines log at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let writer = BufWriter::new(File::create(&path)?);
        Ok(Self {
            writer,
            path,
            topics: TopicCounts::default(),
            start_time_us: None,
            end_time_us: 0,
        })
    }

    /// Append one record as a line.
    pub fn record(&mut self, record: &LogRecord) -> Result<()> {
        let line = match record {
            LogRecord::PoseEstimation(rec) | LogRecord::PoseVisual(rec) => {
                to_line(record.topic(), rec)?
            }
            LogRecord::Benchmark(rec) => to_line(record.topic(), rec)?,
        };
        writeln!(self.writer, "{}", line)?;

        let timestamp = record.timestamp_us();
        self.start_time_us.get_or_insert(timestamp);
        self.end_time_us = timestamp;
        self.topics.add(record.topic());
        Ok(())
    }

    /// Flush and close the file.
    pub fn finish(mut self) -> Result<LogInfo> {
        self.writer.flush()?;
        let file_size_bytes = std::fs::metadata(&self.path)?.len();
        Ok(LogInfo {
            path: self.path,
            duration_us: self
                .end_time_us
                .saturating_sub(self.start_time_us.unwrap_or(0)),
            record_count: self.topics.total(),
            file_size_bytes,
            topics: self.topics,
        })
    }
}

fn to_line<T: Serialize>(topic: Topic, rec: &Timestamped<T>) -> Result<String> {
    let fields = match serde_json::to_value(&rec.data) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            return Err(LogError::Serialize(format!(
                "payload for {} is not an object: {}",
                topic, other
            )));
        }
        Err(e) => return Err(LogError::Serialize(e.to_string())),
    };

    let mut object = Map::new();
    object.insert("timestamp_us".to_string(), Value::from(rec.timestamp_us));
    object.insert("topic".to_string(), Value::from(topic.as_str()));
    object.extend(fields);

    serde_json::to_string(&Value::Object(object)).map_err(|e| LogError::Serialize(e.to_string()))
}
