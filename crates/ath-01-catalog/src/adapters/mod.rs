//! # Adapters Layer
//!
//! Loads catalogs from JSON sources.

mod json;

pub use json::{default_catalog, load_catalog_file, parse_catalog};
