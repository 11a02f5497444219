//! Service construction in dependency order: catalog, store, engine.

use super::config::NodeConfig;
use anyhow::{Context, Result};
use ath_01_catalog::{default_catalog, load_catalog_file, Catalog};
use ath_02_progress::{InMemoryDocumentStore, ProgressService};
use std::sync::Arc;
use tracing::info;

/// Shared service instances.
pub struct ServiceContainer {
    pub config: NodeConfig,
    pub catalog: Arc<Catalog>,
    pub store: Arc<InMemoryDocumentStore>,
    pub progress: Arc<ProgressService<InMemoryDocumentStore>>,
}

impl ServiceContainer {
    pub fn new(config: NodeConfig) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => load_catalog_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => default_catalog().context("Bundled catalog is invalid")?,
        };
        let catalog = Arc::new(catalog);
        info!(
            cards = catalog.cards().count(),
            arenas = catalog.arenas().count(),
            shop_items = catalog.shop_items().count(),
            "Catalog ready"
        );

        let store = Arc::new(InMemoryDocumentStore::new());
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&store),
            Arc::clone(&catalog),
            config.engine.clone(),
        ));

        Ok(Self {
            config,
            catalog,
            store,
            progress,
        })
    }
}
