//! JSON catalog loader.

use crate::domain::{Catalog, CatalogError, CatalogFile};
use std::path::Path;
use tracing::info;

const DEFAULT_CATALOG: &str = include_str!("../../data/default_catalog.json");

/// Parses and validates a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    Catalog::from_file(file)
}

/// Reads a catalog file from disk.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog(&json)?;
    info!(
        path = %path.display(),
        cards = catalog.cards().count(),
        arenas = catalog.arenas().count(),
        "[ath-01] Catalog loaded"
    );
    Ok(catalog)
}

/// Catalog bundled with the binary.
pub fn default_catalog() -> Result<Catalog, CatalogError> {
    parse_catalog(DEFAULT_CATALOG)
}
