//! # Core Identifiers
//!
//! Types shared between the catalog, the progress engine and the gateway.
//!
//! ## Clusters
//!
//! - **Identity**: `PlayerId`, `GuildId`
//! - **Content**: `CardId`, `School`, `ArenaId`
//! - **Economy**: `Currency`
//! - **Time**: `Timestamp`

use crate::errors::IdentifierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Arena identifier. Arenas are ordered by id; a higher id is a later arena.
pub type ArenaId = u32;

/// Maximum length of string identifiers.
pub const MAX_IDENTIFIER_LEN: usize = 64;

fn validate_identifier(kind: &'static str, raw: &str) -> Result<String, IdentifierError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if trimmed.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong {
            kind,
            max: MAX_IDENTIFIER_LEN,
        });
    }
    if let Some(found) = trimmed
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.'))
    {
        return Err(IdentifierError::InvalidCharacter { kind, found });
    }
    Ok(trimmed.to_string())
}

/// Authenticated player identity, supplied by upstream middleware.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    /// Parses and validates a player id.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IdentifierError> {
        validate_identifier("player id", raw.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable catalog identifier of a card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    /// Parses and validates a card id.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IdentifierError> {
        validate_identifier("card id", raw.as_ref()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Philosophical school a card belongs to. Arenas unlock schools.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct School(pub String);

impl School {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Guild identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(pub Uuid);

impl GuildId {
    /// Generates a fresh random guild id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for GuildId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdentifierError::InvalidGuildId(s.to_string()))
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Soft currencies tracked per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Scrolls,
    Books,
}

impl Currency {
    /// Every currency, in ledger order.
    pub const ALL: [Currency; 2] = [Currency::Scrolls, Currency::Books];

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Scrolls => "scrolls",
            Currency::Books => "books",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Currency {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scrolls" => Ok(Currency::Scrolls),
            "books" => Ok(Currency::Books),
            other => Err(IdentifierError::UnknownCurrency(other.to_string())),
        }
    }
}
