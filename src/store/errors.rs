//! Store error types.

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the document store.
///
/// A not-found condition is never an error: lookups resolve to `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failure while opening, writing, or reading the record log
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A record failed checksum or framing validation
    #[error("corrupt record at offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// A document body could not be serialized or deserialized
    #[error("invalid document body: {0}")]
    Document(#[from] serde_json::Error),
}

impl StoreError {
    /// I/O error with context
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Corruption error anchored to a log offset
    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Returns whether this error indicates log corruption.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corruption { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corruption_display_includes_offset() {
        let err = StoreError::corruption(1024, "checksum mismatch");
        let display = err.to_string();
        assert!(display.contains("1024"));
        assert!(display.contains("checksum mismatch"));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_io_error_preserves_source() {
        let err = StoreError::io(
            "failed to open record log",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_corruption());
        assert!(std::error::Error::source(&err).is_some());
    }
}
