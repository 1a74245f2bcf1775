//! Thread-safe handle over a [`DedupEngine`].

use std::sync::Arc;

use nd_core::{DedupConfig, DedupResult, LibrarySearchResult, Result, TextItem};
use parking_lot::RwLock;

use crate::engine::{DedupEngine, DedupOptions, SearchOptions};

/// Cloneable handle sharing one engine. Reads (dedup, search, export) run
/// concurrently; library mutations take the write lock and are serialized.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<DedupEngine>>,
}

impl SharedEngine {
    pub fn new(config: DedupConfig) -> Result<Self> {
        Ok(Self::from_engine(DedupEngine::new(config)?))
    }

    pub fn from_engine(engine: DedupEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn dedup(&self, items: &[TextItem], options: DedupOptions) -> DedupResult {
        self.inner.read().dedup(items, options)
    }

    pub fn search_library(&self, queries: &[String], options: SearchOptions) -> Vec<LibrarySearchResult> {
        self.inner.read().search_library(queries, options)
    }

    pub fn add_to_library(&self, items: &[TextItem]) -> usize {
        self.inner.write().add_to_library(items)
    }

    pub fn remove_from_library(&self, ids: &[String]) -> usize {
        self.inner.write().remove_from_library(ids)
    }

    pub fn clear_library(&self) {
        self.inner.write().clear_library();
    }

    pub fn export_library(&self) -> Vec<TextItem> {
        self.inner.read().export_library()
    }

    pub fn import_library(&self, items: &[TextItem]) -> usize {
        self.inner.write().import_library(items)
    }

    pub fn library_size(&self) -> usize {
        self.inner.read().library_size()
    }

    /// Run `f` with exclusive access, e.g. to dedup and then add the survivors
    /// without another writer slipping in between.
    pub fn with_exclusive<R>(&self, f: impl FnOnce(&mut DedupEngine) -> R) -> R {
        f(&mut *self.inner.write())
    }
}
