//! Product sources per manufacturer.
//!
//! Each manufacturer exposes its catalog through a [`ProductSource`]. The
//! [`SourceRegistry`] maps manufacturer ids to sources so callers never
//! branch on manufacturer names.

use std::collections::BTreeMap;
use std::fs;

use crate::error::{PipelineError, Result};
use crate::model::{EntityKind, ProductRecord};
use crate::store::{Layout, RecordStore};

/// Registry key used for the legacy single-tenant layout.
pub const LEGACY_KEY: &str = "default";

/// Read access to one manufacturer's products.
pub trait ProductSource: Send + Sync {
    /// What: List every product in `lang`.
    ///
    /// # Errors
    /// - Returns `Err` when the records cannot be read.
    fn list_all(&self, lang: &str) -> Result<Vec<ProductRecord>>;

    /// What: Find one product by id in `lang`.
    ///
    /// Output:
    /// - `Ok(None)` when no product carries `id`.
    ///
    /// # Errors
    /// - Returns `Err` when the records cannot be read.
    fn get_by_id(&self, id: &str, lang: &str) -> Result<Option<ProductRecord>> {
        Ok(self.list_all(lang)?.into_iter().find(|p| p.id == id))
    }
}

/// Products read from the flat-file record store.
#[derive(Clone, Debug)]
pub struct RecordStoreSource {
    /// Backing store.
    store: RecordStore,
    /// Manufacturer segment, or `None` for the legacy layout.
    manufacturer: Option<String>,
}

impl RecordStoreSource {
    /// Source over `store` for one manufacturer.
    #[must_use]
    pub const fn new(store: RecordStore, manufacturer: Option<String>) -> Self {
        Self { store, manufacturer }
    }
}

impl ProductSource for RecordStoreSource {
    fn list_all(&self, lang: &str) -> Result<Vec<ProductRecord>> {
        self.store.read_all(self.manufacturer.as_deref(), lang)
    }
}

/// Manufacturer id → product source.
#[derive(Default)]
pub struct SourceRegistry {
    /// Registered sources, sorted by manufacturer id.
    sources: BTreeMap<String, Box<dyn ProductSource>>,
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("manufacturers", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SourceRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the source for `manufacturer`.
    pub fn register(&mut self, manufacturer: impl Into<String>, source: Box<dyn ProductSource>) {
        self.sources.insert(manufacturer.into(), source);
    }

    /// Registered manufacturer ids, sorted.
    #[must_use]
    pub fn manufacturers(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    /// What: Look up the source for `manufacturer`.
    ///
    /// # Errors
    /// - Returns `UnknownManufacturer` when nothing is registered under that id.
    pub fn get(&self, manufacturer: &str) -> Result<&dyn ProductSource> {
        self.sources
            .get(manufacturer)
            .map(AsRef::as_ref)
            .ok_or_else(|| PipelineError::UnknownManufacturer(manufacturer.to_string()))
    }

    /// What: Register a record-store source for every manufacturer on disk.
    ///
    /// Inputs:
    /// - `layout`: Project layout
    ///
    /// Output:
    /// - Registry keyed by the subdirectories of `content/products`.
    ///
    /// # Errors
    /// - Returns `Err` when the products directory exists but cannot be listed.
    ///
    /// Details:
    /// - A subdirectory holding record files directly is a legacy language
    ///   directory; the legacy layout is then registered as [`LEGACY_KEY`].
    pub fn from_layout(layout: &Layout) -> Result<Self> {
        let mut registry = Self::new();
        let products_dir = layout.content_dir.join(EntityKind::Product.dir_name());
        if !products_dir.is_dir() {
            return Ok(registry);
        }
        let store = RecordStore::new(layout.clone());
        let entries = fs::read_dir(&products_dir).map_err(|e| PipelineError::io(&products_dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| PipelineError::io(&products_dir, e))?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if crate::store::list_json_files(&path)?.is_empty() {
                registry.register(
                    name,
                    Box::new(RecordStoreSource::new(store.clone(), Some(name.to_string()))),
                );
            } else {
                registry.register(LEGACY_KEY, Box::new(RecordStoreSource::new(store.clone(), None)));
            }
        }
        tracing::debug!(manufacturers = ?registry.manufacturers(), "product sources registered");
        Ok(registry)
    }
}
