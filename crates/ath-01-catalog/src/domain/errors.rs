//! # Catalog Errors

use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON was malformed.
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries of the same table share an id.
    #[error("Duplicate {table} id: {id}")]
    DuplicateId { table: &'static str, id: String },

    /// An arena unlocks a school no card belongs to.
    #[error("Arena {arena_id} references unknown school {school}")]
    UnknownSchool { arena_id: u32, school: String },

    /// The catalog has no arenas.
    #[error("Catalog must define at least one arena")]
    NoArenas,

    /// Arena thresholds must grow with arena id.
    #[error("Arena {arena_id} threshold {threshold} is below the previous arena's")]
    ThresholdOrder { arena_id: u32, threshold: u32 },

    /// A shop item's grant does not match its kind, or references a missing card.
    #[error("Shop item {item_id} is invalid: {reason}")]
    InvalidShopItem { item_id: String, reason: String },
}
