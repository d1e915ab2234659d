//! Error type for log reading and writing.

use thiserror::Error;

/// Log I/O errors
#[derive(Error, Debug)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Record too large: {0} bytes")]
    RecordTooLarge(usize),

    /// A line of a JSON Lines log could not be decoded.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

impl From<postcard::Error> for LogError {
    fn from(e: postcard::Error) -> Self {
        LogError::Deserialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
