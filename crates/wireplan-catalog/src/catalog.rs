//! Catalog input seam and the in-memory implementation

use serde::{Deserialize, Serialize};

use crate::entry::TypeEntry;
use crate::error::CatalogError;

/// Source of component type records for a planning pass
///
/// Implemented by whatever facility enumerates component-marked types in the
/// host environment. Enumeration order is the discovery order that every
/// downstream tie-break refers to.
pub trait TypeCatalog {
    /// All component-marked type records, in discovery order
    fn enumerate(&self) -> Vec<TypeEntry>;
}

/// In-memory catalog ordered by insertion
///
/// Used by tests and by drivers that load a catalog dump produced by host
/// tooling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryCatalog {
    entries: Vec<TypeEntry>,
}

impl MemoryCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; insertion order is discovery order
    pub fn insert(&mut self, entry: TypeEntry) {
        self.entries.push(entry);
    }

    /// Append an entry, chaining
    pub fn with_entry(mut self, entry: TypeEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a catalog from a JSON dump
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize the catalog as a JSON dump
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TypeCatalog for MemoryCatalog {
    fn enumerate(&self) -> Vec<TypeEntry> {
        self.entries.clone()
    }
}
