//! Typed query and mutation operations over the document store.
//!
//! The registry owns the shared store handle. It is constructed once at
//! boot and handed to the API gateway; resolvers never touch the store
//! directly. Lookups match names case-insensitively by substring, and a
//! miss on find/update/remove is `Ok(None)`, never an error.

use std::path::Path;

use serde_json::json;
use tokio::sync::RwLock;

use crate::store::{DocumentStore, NamePattern, StoreResult};

use super::entities::{Wielder, Zanpakuto};

/// Collection holding wielder documents
pub const WIELDERS: &str = "wielders";
/// Collection holding zanpakuto documents
pub const ZANPAKUTOS: &str = "zanpakutos";

/// Shared, lock-guarded access to the two entity collections.
pub struct Registry {
    store: RwLock<DocumentStore>,
}

impl Registry {
    /// Wraps an already-opened store.
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Opens the store under `data_dir` and wraps it.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        Ok(Self::new(DocumentStore::open(data_dir)?))
    }

    /// Live record counts per collection: `(wielders, zanpakutos)`.
    pub async fn record_counts(&self) -> (usize, usize) {
        let store = self.store.read().await;
        (store.count(WIELDERS), store.count(ZANPAKUTOS))
    }

    // ==================
    // Wielders
    // ==================

    /// All wielders in insertion order.
    pub async fn list_wielders(&self) -> StoreResult<Vec<Wielder>> {
        let store = self.store.read().await;
        store
            .find_all(WIELDERS)?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .collect()
    }

    /// First wielder whose name contains the pattern, ignoring case.
    pub async fn find_wielder(&self, pattern: &str) -> StoreResult<Option<Wielder>> {
        let store = self.store.read().await;
        store
            .find_first_matching(WIELDERS, "name", &NamePattern::new(pattern))?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Persists a new wielder and returns it. The returned record is
    /// durable: the write has been acknowledged by the store.
    pub async fn create_wielder(&self, name: &str, zanpakuto: &str) -> StoreResult<Wielder> {
        let wielder = Wielder::new(name, zanpakuto);
        let mut store = self.store.write().await;
        store.insert(
            WIELDERS,
            &wielder.id.to_string(),
            &serde_json::to_value(&wielder)?,
        )?;
        Ok(wielder)
    }

    /// Replaces the name and zanpakuto reference of the first wielder
    /// matching the pattern. Returns the post-update record, or `None`.
    pub async fn update_wielder(
        &self,
        pattern: &str,
        updated_name: &str,
        updated_zanpakuto: &str,
    ) -> StoreResult<Option<Wielder>> {
        let mut store = self.store.write().await;
        store
            .update_first_matching(WIELDERS, "name", &NamePattern::new(pattern), |doc| {
                doc["name"] = json!(updated_name);
                doc["zanpakuto"] = json!(updated_zanpakuto);
            })?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Deletes the first wielder matching the pattern. Returns the
    /// removed record, or `None`.
    pub async fn remove_wielder(&self, pattern: &str) -> StoreResult<Option<Wielder>> {
        let mut store = self.store.write().await;
        store
            .delete_first_matching(WIELDERS, "name", &NamePattern::new(pattern))?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    // ==================
    // Zanpakutos
    // ==================

    /// All zanpakutos in insertion order.
    pub async fn list_zanpakutos(&self) -> StoreResult<Vec<Zanpakuto>> {
        let store = self.store.read().await;
        store
            .find_all(ZANPAKUTOS)?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .collect()
    }

    /// First zanpakuto whose name contains the pattern, ignoring case.
    pub async fn find_zanpakuto(&self, pattern: &str) -> StoreResult<Option<Zanpakuto>> {
        let store = self.store.read().await;
        store
            .find_first_matching(ZANPAKUTOS, "name", &NamePattern::new(pattern))?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Persists a new zanpakuto and returns it once durable.
    pub async fn create_zanpakuto(&self, name: &str, bankai: &str) -> StoreResult<Zanpakuto> {
        let zanpakuto = Zanpakuto::new(name, bankai);
        let mut store = self.store.write().await;
        store.insert(
            ZANPAKUTOS,
            &zanpakuto.id.to_string(),
            &serde_json::to_value(&zanpakuto)?,
        )?;
        Ok(zanpakuto)
    }

    /// Replaces the name and bankai of the first zanpakuto matching the
    /// pattern. Returns the post-update record, or `None`.
    pub async fn update_zanpakuto(
        &self,
        pattern: &str,
        updated_name: &str,
        updated_bankai: &str,
    ) -> StoreResult<Option<Zanpakuto>> {
        let mut store = self.store.write().await;
        store
            .update_first_matching(ZANPAKUTOS, "name", &NamePattern::new(pattern), |doc| {
                doc["name"] = json!(updated_name);
                doc["bankai"] = json!(updated_bankai);
            })?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Deletes the first zanpakuto matching the pattern. Returns the
    /// removed record, or `None`. Wielders referencing it are untouched;
    /// their reference now dangles and resolves to `None`.
    pub async fn remove_zanpakuto(&self, pattern: &str) -> StoreResult<Option<Zanpakuto>> {
        let mut store = self.store.write().await;
        store
            .delete_first_matching(ZANPAKUTOS, "name", &NamePattern::new(pattern))?
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    // ==================
    // Cross-entity lookup
    // ==================

    /// Resolves a wielder's zanpakuto reference.
    ///
    /// The sole cross-entity lookup: a per-record, case-insensitive
    /// substring search of zanpakuto names against the wielder's stored
    /// reference string. Swapping this for an id-based join would not
    /// change the API schema.
    pub async fn zanpakuto_for(&self, wielder: &Wielder) -> StoreResult<Option<Zanpakuto>> {
        self.find_zanpakuto(&wielder.zanpakuto).await
    }
}
