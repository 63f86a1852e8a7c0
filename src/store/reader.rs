//! Log reader with corruption detection.
//!
//! Every read re-validates the record checksum. A mismatch or a truncated
//! record surfaces as `StoreError::Corruption` and is never skipped.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::{LogRecord, MIN_RECORD_SIZE};

/// Reads records sequentially or at known offsets.
pub struct LogReader {
    log_path: PathBuf,
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the record log for reading.
    pub fn open(log_path: &Path) -> StoreResult<Self> {
        let file = File::open(log_path).map_err(|e| {
            StoreError::io(
                format!("failed to open record log {}", log_path.display()),
                e,
            )
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("failed to read log metadata", e))?
            .len();

        Ok(Self {
            log_path: log_path.to_path_buf(),
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Returns the offset the next sequential read starts at.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Returns whether there are more records to read sequentially.
    pub fn has_more(&self) -> bool {
        self.current_offset < self.file_size
    }

    /// Reads the next record, or `None` at end of log.
    pub fn read_next(&mut self) -> StoreResult<Option<LogRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "truncated log: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                self.current_offset,
                format!("invalid record length: {}", record_length),
            ));
        }

        if record_length > remaining {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "record length {} exceeds remaining log size {}",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[0..4].copy_from_slice(&len_buf);

        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = LogRecord::deserialize(&record_buf)
            .map_err(|e| StoreError::corruption(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;
        Ok(Some(record))
    }

    /// Reads the record starting at a known offset.
    pub fn read_at(&mut self, offset: u64) -> StoreResult<LogRecord> {
        self.reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| StoreError::io(format!("failed to seek to offset {}", offset), e))?;
        self.current_offset = offset;

        self.read_next()?
            .ok_or_else(|| StoreError::corruption(offset, "offset past end of log"))
    }

    /// Reads all records from the current position to the end of the log.
    pub fn read_all(&mut self) -> StoreResult<Vec<LogRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }
}
