//! # Error Types
//!
//! Errors raised while parsing shared identifiers.

use thiserror::Error;

/// Errors produced when a raw value cannot become a shared identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The identifier was empty or whitespace only.
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },

    /// The identifier exceeded the maximum length.
    #[error("{kind} exceeds {max} characters")]
    TooLong { kind: &'static str, max: usize },

    /// The identifier contained characters outside the allowed set.
    #[error("{kind} contains invalid character {found:?}")]
    InvalidCharacter { kind: &'static str, found: char },

    /// Unknown currency symbol.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Malformed guild identifier.
    #[error("Invalid guild id: {0}")]
    InvalidGuildId(String),
}
