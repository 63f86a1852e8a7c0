//! Embedded document store.
//!
//! Persistence for flat JSON documents grouped into named collections,
//! backed by an append-only record log:
//!
//! - Append-only, fsync'd writes (a write is acknowledged only once durable)
//! - Checksum-verified on every read
//! - Latest record wins for the same document id; tombstones delete
//! - In-memory offset index, insertion-ordered per collection
//!
//! All operations are single-document; there are no multi-document
//! transactions. Name lookups use case-insensitive substring matching.

mod documents;
mod errors;
mod pattern;
mod reader;
mod record;
mod writer;

pub use documents::DocumentStore;
pub use errors::{StoreError, StoreResult};
pub use pattern::NamePattern;
pub use reader::LogReader;
pub use record::LogRecord;
pub use writer::LogWriter;
