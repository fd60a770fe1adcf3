//! Storage layer for Playlistr - flat JSON persistence of the catalog.
//!
//! The engine never touches storage; the CLI restores a catalog, edits or
//! computes with it, and saves it back.

mod json;
mod traits;

pub use json::{JsonFileStore, StoredCatalog, read_content_list};
pub use traits::{CatalogStore, MemoryStore};
