//! Storage trait definitions.

use std::sync::RwLock;

use crate::catalog::Catalog;
use crate::error::{PlaylistError, Result};

/// Persistence for the catalog: the content list and the two mode toggles.
pub trait CatalogStore: Send + Sync {
    /// Restore the catalog. A store with nothing saved yields an empty catalog.
    fn load(&self) -> Result<Catalog>;

    /// Replace the saved catalog.
    fn save(&self, catalog: &Catalog) -> Result<()>;
}

/// In-memory store, nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Catalog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> Result<Catalog> {
        let catalog = self.inner.read().map_err(|e| PlaylistError::Storage(e.to_string()))?;
        Ok(catalog.clone())
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let mut inner = self.inner.write().map_err(|e| PlaylistError::Storage(e.to_string()))?;
        *inner = catalog.clone();
        Ok(())
    }
}
