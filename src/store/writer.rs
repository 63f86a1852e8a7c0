//! Append-only log writer.
//!
//! A write is acknowledged only after the record has been appended and
//! fsync'd. Callers therefore never observe a success for a record that
//! could still be lost.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::LogRecord;

/// Appends records to the store's log file.
pub struct LogWriter {
    log_path: PathBuf,
    file: File,
    current_offset: u64,
}

impl LogWriter {
    /// Returns the log file location for a data directory.
    pub fn log_path_for(data_dir: &Path) -> PathBuf {
        data_dir.join("store").join("records.log")
    }

    /// Opens or creates the record log under `<data_dir>/store/records.log`,
    /// creating parent directories as needed.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let store_dir = data_dir.join("store");
        let log_path = store_dir.join("records.log");

        if !store_dir.exists() {
            fs::create_dir_all(&store_dir).map_err(|e| {
                StoreError::io(
                    format!("failed to create store directory {}", store_dir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                StoreError::io(
                    format!("failed to open record log {}", log_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("failed to read log metadata", e))?
            .len();

        Ok(Self {
            log_path,
            file,
            current_offset,
        })
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Returns the offset the next record will be written at.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends a record and fsyncs.
    ///
    /// Returns the byte offset the record was written at.
    pub fn append(&mut self, record: &LogRecord) -> StoreResult<u64> {
        let serialized = record.serialize();
        let offset = self.current_offset;

        self.file.write_all(&serialized).map_err(|e| {
            StoreError::io(
                format!(
                    "failed to append record for {}:{}",
                    record.collection, record.document_id
                ),
                e,
            )
        })?;

        self.file.sync_all().map_err(|e| {
            StoreError::io(
                format!(
                    "fsync failed after appending {}:{}",
                    record.collection, record.document_id
                ),
                e,
            )
        })?;

        self.current_offset += serialized.len() as u64;
        Ok(offset)
    }
}
