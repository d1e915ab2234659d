//! Binary log player.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::error::{LogError, Result};
use super::source::{LogFormat, RecordSource};
use super::types::{HEADER_SIZE, LogHeader, LogRecord, MAX_RECORD_SIZE, Topic};

/// Sequential reader for binary trajectory logs.
///
/// # Example
///
/// ```ignore
/// use pariksha::io::log::LogPlayer;
///
/// let mut player = LogPlayer::open("run.tlog")?;
/// while let Some(record) = player.next_record()? {
///     println!("{} at {} us", record.topic(), record.timestamp_us());
/// }
/// ```
pub struct LogPlayer {
    reader: BufReader<File>,
    header: LogHeader,
    records_read: u64,
}

impl LogPlayer {
    /// Open a binary log and validate its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut header_buffer = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header_buffer).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                LogError::InvalidFormat("File shorter than log header".to_string())
            }
            _ => LogError::Io(e),
        })?;

        let header: LogHeader = postcard::from_bytes(&header_buffer)
            .map_err(|e| LogError::InvalidFormat(format!("Failed to parse header: {}", e)))?;

        if !header.is_valid() {
            return Err(LogError::InvalidFormat(
                "Invalid log file magic bytes".to_string(),
            ));
        }

        Ok(Self {
            reader,
            header,
            records_read: 0,
        })
    }

    /// Get the log header.
    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    /// Get total record count from the header.
    pub fn record_count(&self) -> u64 {
        self.header.record_count
    }

    /// Get number of records read so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Read the next record, or `None` at end of file.
    pub fn next_record(&mut self) -> Result<Option<LogRecord>> {
        let mut len_bytes = [0u8; 4];
        match self.read_prefix(&mut len_bytes)? {
            0 => {
                if self.records_read != self.header.record_count {
                    return Err(LogError::InvalidFormat(format!(
                        "log ends after {} of {} records",
                        self.records_read, self.header.record_count
                    )));
                }
                return Ok(None);
            }
            4 => {}
            n => {
                return Err(LogError::InvalidFormat(format!(
                    "truncated record length ({} of 4 bytes)",
                    n
                )));
            }
        }

        let len = u32::from_le_bytes(len_bytes) as usize;
        if len > MAX_RECORD_SIZE {
            return Err(LogError::RecordTooLarge(len));
        }

        let mut payload = vec![0u8; len];
        self.reader.read_exact(&mut payload)?;

        let record: LogRecord = postcard::from_bytes(&payload)?;
        self.records_read += 1;

        Ok(Some(record))
    }

    /// Fill `buf` until it is full or the file ends, returning the bytes read.
    fn read_prefix(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    /// Reset to the first record.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
        self.records_read = 0;
        Ok(())
    }

    /// Iterate over records of a single topic.
    pub fn topic_iter(&mut self, topic: Topic) -> impl Iterator<Item = Result<LogRecord>> + '_ {
        std::iter::from_fn(move || loop {
            match self.next_record() {
                Ok(Some(record)) if record.topic() == topic => return Some(Ok(record)),
                Ok(Some(_)) => continue,
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        })
    }
}

impl RecordSource for LogPlayer {
    fn next_record(&mut self) -> Result<Option<LogRecord>> {
        LogPlayer::next_record(self)
    }

    fn format(&self) -> LogFormat {
        LogFormat::Binary
    }
}

impl Iterator for LogPlayer {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
