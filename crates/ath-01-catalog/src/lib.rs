//! # ath-01-catalog
//!
//! Read-only reference data for Athenaeum: cards, arenas and shop items.
//!
//! ## Role in System
//!
//! - **Reference data only**: nothing in this crate is mutated after load.
//! - **ID-indexed**: every table is keyed by its stable identifier. Callers
//!   that draw a card receive its `CardId` directly and never have to scan
//!   the tables to find out which card they hold.
//! - **Validated at load**: dangling school references, duplicate ids and
//!   shop items whose grant does not match their kind are rejected before
//!   the catalog is handed to the engine.
//!
//! ## Module Structure
//!
//! ```text
//! ath-01-catalog/
//! ├── domain/     # CardDefinition, Arena, ShopItem, Catalog registry, errors
//! └── adapters/   # JSON loading + bundled default catalog
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;

pub use adapters::{default_catalog, load_catalog_file, parse_catalog};
pub use domain::*;
