//! Trajectory log reading and writing.
//!
//! Logs carry three topics: `/pose_estimation`, `/pose_visual` and
//! `/benchmark`. Two encodings are supported.
//!
//! # Binary format
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Header (64 bytes, Postcard)                      │
//! │ - Magic: "TLOG" (4 bytes)                        │
//! │ - Version: u16                                   │
//! │ - Flags: u16                                     │
//! │ - Start time: u64 (microseconds)                 │
//! │ - End time: u64 (microseconds)                   │
//! │ - Record count: u64                              │
//! │ - Reserved: 24 bytes                             │
//! ├──────────────────────────────────────────────────┤
//! │ Record Stream                                    │
//! │ [len:u32 LE][postcard LogRecord]...              │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! # JSON Lines format
//!
//! See [`jsonl`]. Useful for exporting logs from other tools.
//!
//! # Example
//!
//! ```ignore
//! use pariksha::io::log::{open_log, records};
//!
//! let mut source = open_log("run.tlog")?;
//! for record in records(source.as_mut()) {
//!     println!("{}", record?.topic());
//! }
//! ```

mod error;
pub mod jsonl;
mod player;
mod recorder;
mod source;
mod types;

pub use error::{LogError, Result};
pub use jsonl::{JsonlReader, JsonlWriter};
pub use player::LogPlayer;
pub use recorder::LogRecorder;
pub use source::{LogFormat, RecordSource, detect_format, open_log, read_log, records};
pub use types::{
    HEADER_SIZE, LOG_MAGIC, LOG_VERSION, LogHeader, LogInfo, LogRecord, MAX_RECORD_SIZE,
    TOPIC_BENCHMARK, TOPIC_POSE_ESTIMATION, TOPIC_POSE_VISUAL, Topic, TopicCounts,
};

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
pub use test_fixtures::{FIXTURE_START_US, LogTestFixture};
