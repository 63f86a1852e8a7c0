//! Collection-level document operations.
//!
//! `DocumentStore` fronts the record log with single-document operations:
//! insert, find-all, and find/update/delete of the first document whose
//! field matches a pattern. An in-memory index maps each live document to
//! its latest log offset; document bodies always come back from the log
//! itself, checksum-verified per read.
//!
//! The index preserves insertion order per collection, so "first match"
//! means first-created, and an updated document keeps its position.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::StoreResult;
use super::pattern::NamePattern;
use super::reader::LogReader;
use super::record::LogRecord;
use super::writer::LogWriter;

#[derive(Debug)]
struct IndexEntry {
    document_id: String,
    offset: u64,
}

struct FoundDocument {
    position: usize,
    document_id: String,
    document: Value,
}

/// Durable store of JSON documents grouped into named collections.
pub struct DocumentStore {
    log_path: PathBuf,
    writer: LogWriter,
    collections: HashMap<String, Vec<IndexEntry>>,
}

impl DocumentStore {
    /// Returns the log file location for a data directory.
    pub fn log_path_for(data_dir: &Path) -> PathBuf {
        LogWriter::log_path_for(data_dir)
    }

    /// Opens the store, creating the record log if needed and rebuilding
    /// the offset index from existing records.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let writer = LogWriter::open(data_dir)?;
        let log_path = writer.path().to_path_buf();
        let collections = Self::rebuild_index(&log_path, writer.current_offset())?;

        Ok(Self {
            log_path,
            writer,
            collections,
        })
    }

    /// Scans the log and reconstructs the live-document index.
    ///
    /// Latest record wins for the same document id; a tombstone removes
    /// the document. Surviving documents keep their original insertion
    /// position.
    fn rebuild_index(
        log_path: &Path,
        log_size: u64,
    ) -> StoreResult<HashMap<String, Vec<IndexEntry>>> {
        let mut collections: HashMap<String, Vec<IndexEntry>> = HashMap::new();
        if log_size == 0 {
            return Ok(collections);
        }

        let mut reader = LogReader::open(log_path)?;
        loop {
            let offset = reader.current_offset();
            let record = match reader.read_next()? {
                Some(record) => record,
                None => break,
            };

            let entries = collections.entry(record.collection).or_default();
            if record.is_tombstone {
                entries.retain(|entry| entry.document_id != record.document_id);
            } else if let Some(entry) = entries
                .iter_mut()
                .find(|entry| entry.document_id == record.document_id)
            {
                entry.offset = offset;
            } else {
                entries.push(IndexEntry {
                    document_id: record.document_id,
                    offset,
                });
            }
        }

        Ok(collections)
    }

    /// Returns the path of the underlying record log.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Returns the number of live documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, Vec::len)
    }

    fn read_document(&self, offset: u64) -> StoreResult<Value> {
        let mut reader = LogReader::open(&self.log_path)?;
        let record = reader.read_at(offset)?;
        Ok(serde_json::from_slice(&record.body)?)
    }

    /// Inserts a document, durably, under a caller-assigned identifier.
    pub fn insert(&mut self, collection: &str, document_id: &str, body: &Value) -> StoreResult<()> {
        let record = LogRecord::document(collection, document_id, serde_json::to_vec(body)?);
        let offset = self.writer.append(&record)?;

        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(IndexEntry {
                document_id: document_id.to_string(),
                offset,
            });
        Ok(())
    }

    /// Returns every live document in a collection, in insertion order.
    pub fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let entries = match self.collections.get(collection) {
            Some(entries) => entries,
            None => return Ok(Vec::new()),
        };
        entries
            .iter()
            .map(|entry| self.read_document(entry.offset))
            .collect()
    }

    fn find_entry(
        &self,
        collection: &str,
        field: &str,
        pattern: &NamePattern,
    ) -> StoreResult<Option<FoundDocument>> {
        let entries = match self.collections.get(collection) {
            Some(entries) => entries,
            None => return Ok(None),
        };

        for (position, entry) in entries.iter().enumerate() {
            let document = self.read_document(entry.offset)?;
            let matched = document
                .get(field)
                .and_then(Value::as_str)
                .map_or(false, |value| pattern.matches(value));
            if matched {
                return Ok(Some(FoundDocument {
                    position,
                    document_id: entry.document_id.clone(),
                    document,
                }));
            }
        }
        Ok(None)
    }

    /// Returns the first document whose field matches the pattern.
    pub fn find_first_matching(
        &self,
        collection: &str,
        field: &str,
        pattern: &NamePattern,
    ) -> StoreResult<Option<Value>> {
        Ok(self
            .find_entry(collection, field, pattern)?
            .map(|found| found.document))
    }

    /// Rewrites the first document whose field matches the pattern and
    /// returns its updated form, or `None` when nothing matched.
    pub fn update_first_matching(
        &mut self,
        collection: &str,
        field: &str,
        pattern: &NamePattern,
        mutate: impl FnOnce(&mut Value),
    ) -> StoreResult<Option<Value>> {
        let found = match self.find_entry(collection, field, pattern)? {
            Some(found) => found,
            None => return Ok(None),
        };

        let mut document = found.document;
        mutate(&mut document);

        let record = LogRecord::document(
            collection,
            found.document_id.as_str(),
            serde_json::to_vec(&document)?,
        );
        let offset = self.writer.append(&record)?;

        if let Some(entries) = self.collections.get_mut(collection) {
            entries[found.position].offset = offset;
        }
        Ok(Some(document))
    }

    /// Removes the first document whose field matches the pattern and
    /// returns its last live form, or `None` when nothing matched.
    pub fn delete_first_matching(
        &mut self,
        collection: &str,
        field: &str,
        pattern: &NamePattern,
    ) -> StoreResult<Option<Value>> {
        let found = match self.find_entry(collection, field, pattern)? {
            Some(found) => found,
            None => return Ok(None),
        };

        let record = LogRecord::tombstone(collection, found.document_id.as_str());
        self.writer.append(&record)?;

        if let Some(entries) = self.collections.get_mut(collection) {
            entries.remove(found.position);
        }
        Ok(Some(found.document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn open_store(temp_dir: &TempDir) -> DocumentStore {
        DocumentStore::open(temp_dir.path()).unwrap()
    }

    #[test]
    fn test_insert_and_find_all_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store
            .insert("wielders", "1", &json!({"name": "Ichigo"}))
            .unwrap();
        store
            .insert("wielders", "2", &json!({"name": "Rukia"}))
            .unwrap();

        let all = store.find_all("wielders").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["name"], "Ichigo");
        assert_eq!(all[1]["name"], "Rukia");
        assert_eq!(store.count("wielders"), 2);
    }

    #[test]
    fn test_find_all_unknown_collection_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        assert!(store.find_all("wielders").unwrap().is_empty());
        assert_eq!(store.count("wielders"), 0);
    }

    #[test]
    fn test_find_first_matching_is_case_insensitive_substring() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store
            .insert("zanpakutos", "1", &json!({"name": "Zangetsu"}))
            .unwrap();

        let found = store
            .find_first_matching("zanpakutos", "name", &NamePattern::new("getsu"))
            .unwrap();
        assert_eq!(found.unwrap()["name"], "Zangetsu");

        let missing = store
            .find_first_matching("zanpakutos", "name", &NamePattern::new("senbon"))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_first_match_respects_insertion_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store
            .insert("wielders", "1", &json!({"name": "Kurosaki Ichigo"}))
            .unwrap();
        store
            .insert("wielders", "2", &json!({"name": "Kurosaki Isshin"}))
            .unwrap();

        let found = store
            .find_first_matching("wielders", "name", &NamePattern::new("kurosaki"))
            .unwrap()
            .unwrap();
        assert_eq!(found["name"], "Kurosaki Ichigo");
    }

    #[test]
    fn test_update_first_matching_keeps_position_and_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store
            .insert("wielders", "1", &json!({"name": "Ichigo", "zanpakuto": "Zangetsu"}))
            .unwrap();
        store
            .insert("wielders", "2", &json!({"name": "Rukia", "zanpakuto": "Sode no Shirayuki"}))
            .unwrap();

        let updated = store
            .update_first_matching("wielders", "name", &NamePattern::new("ichigo"), |doc| {
                doc["name"] = json!("Kurosaki Ichigo");
            })
            .unwrap()
            .unwrap();
        assert_eq!(updated["name"], "Kurosaki Ichigo");
        assert_eq!(updated["zanpakuto"], "Zangetsu");

        // Still first in listing order after the rewrite
        let all = store.find_all("wielders").unwrap();
        assert_eq!(all[0]["name"], "Kurosaki Ichigo");
        assert_eq!(all[1]["name"], "Rukia");
        assert_eq!(store.count("wielders"), 2);
    }

    #[test]
    fn test_update_no_match_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let updated = store
            .update_first_matching("wielders", "name", &NamePattern::new("nobody"), |doc| {
                doc["name"] = json!("unused");
            })
            .unwrap();
        assert!(updated.is_none());
    }

    #[test]
    fn test_delete_first_matching_then_second_delete_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store
            .insert("zanpakutos", "1", &json!({"name": "Zangetsu"}))
            .unwrap();

        let removed = store
            .delete_first_matching("zanpakutos", "name", &NamePattern::new("zangetsu"))
            .unwrap();
        assert_eq!(removed.unwrap()["name"], "Zangetsu");
        assert_eq!(store.count("zanpakutos"), 0);

        let second = store
            .delete_first_matching("zanpakutos", "name", &NamePattern::new("zangetsu"))
            .unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn test_reopen_rebuilds_index() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut store = open_store(&temp_dir);
            store
                .insert("wielders", "1", &json!({"name": "Ichigo"}))
                .unwrap();
            store
                .insert("wielders", "2", &json!({"name": "Rukia"}))
                .unwrap();
            store
                .delete_first_matching("wielders", "name", &NamePattern::new("ichigo"))
                .unwrap();
        }

        let store = open_store(&temp_dir);
        let all = store.find_all("wielders").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["name"], "Rukia");
    }
}
