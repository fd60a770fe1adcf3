//! JSON file storage for the catalog.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::traits::CatalogStore;
use crate::catalog::Catalog;
use crate::domain::Content;
use crate::error::{PlaylistError, Result};

/// On-disk document: the catalog plus the time it was last written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCatalog {
    #[serde(flatten)]
    pub catalog: Catalog,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Catalog stored as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full document, including its timestamp.
    pub fn load_document(&self) -> Result<Option<StoredCatalog>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let document: StoredCatalog = serde_json::from_str(&content)?;
        Ok(Some(document))
    }

    /// Sibling temp file used for atomic replacement.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> Result<Catalog> {
        match self.load_document()? {
            Some(document) => {
                log::debug!(
                    "Restored {} contents from {}",
                    document.catalog.len(),
                    self.path.display()
                );
                Ok(document.catalog)
            }
            None => {
                log::info!("No state file at {}, starting empty", self.path.display());
                Ok(Catalog::default())
            }
        }
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let document = StoredCatalog {
            catalog: catalog.clone(),
            updated_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&document)?;

        // Write then rename so a crash never leaves a half-written file
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)
            .map_err(|e| PlaylistError::Storage(format!("{}: {}", self.path.display(), e)))?;

        log::debug!("Saved {} contents to {}", catalog.len(), self.path.display());
        Ok(())
    }
}

/// Read a bare JSON array of contents, as exported by other tools.
pub fn read_content_list(path: impl AsRef<Path>) -> Result<Vec<Content>> {
    let content = fs::read_to_string(path.as_ref())?;
    let contents: Vec<Content> = serde_json::from_str(&content)?;
    Ok(contents)
}
