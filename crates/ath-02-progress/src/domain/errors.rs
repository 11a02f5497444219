//! # Domain Errors
//!
//! Every failure a progress operation can report. Any error returned from a
//! transaction body aborts the transaction with no writes.

use ath_01_catalog::ItemKind;
use shared_types::{CardId, Currency, GuildId, PlayerId, Timestamp};
use thiserror::Error;

/// Failure taxonomy used by callers to pick a response class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input, rejected before touching the store.
    Validation,
    /// A domain invariant would be violated.
    Domain,
    /// A referenced player, guild or chest does not exist.
    NotFound,
    /// The store failed or stayed contended.
    Infrastructure,
}

/// Errors raised by the document store port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A document read by the transaction changed before commit.
    #[error("Write conflict on {path}")]
    Conflict { path: String },

    /// The store is unreachable.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Progress engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No chest at slot {index}")]
    NoChestAtIndex { index: usize },

    #[error("Chest at slot {index} is not locked")]
    ChestNotLocked { index: usize },

    #[error("Another chest is already unlocking (slot {index})")]
    AnotherChestUnlocking { index: usize },

    #[error("Chest at slot {index} is not ready")]
    ChestNotReady {
        index: usize,
        ready_at: Option<Timestamp>,
    },

    #[error("All chest slots are occupied")]
    NoFreeChestSlot,

    #[error("Insufficient {currency}: required {required}, available {available}")]
    InsufficientFunds {
        currency: Currency,
        required: u64,
        available: u64,
    },

    #[error("Balance overflow for {currency}")]
    BalanceOverflow { currency: Currency },

    #[error("Card {card_id} not owned: required {required}, owned {owned}")]
    CardNotOwned {
        card_id: CardId,
        required: u64,
        owned: u64,
    },

    #[error("Shop item not found: {kind}/{item_id}")]
    ItemNotFound { kind: ItemKind, item_id: String },

    #[error("Player already belongs to guild {guild_id}")]
    AlreadyInGuild { guild_id: GuildId },

    #[error("User not found: {0}")]
    UserNotFound(PlayerId),

    #[error("Guild not found: {0}")]
    GuildNotFound(GuildId),

    #[error("Transaction aborted after {attempts} conflicting attempts")]
    Contention { attempts: u32 },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProgressError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::Validation,
            Self::ChestNotLocked { .. }
            | Self::AnotherChestUnlocking { .. }
            | Self::ChestNotReady { .. }
            | Self::NoFreeChestSlot
            | Self::InsufficientFunds { .. }
            | Self::BalanceOverflow { .. }
            | Self::CardNotOwned { .. }
            | Self::ItemNotFound { .. }
            | Self::AlreadyInGuild { .. } => ErrorKind::Domain,
            Self::NoChestAtIndex { .. } | Self::UserNotFound(_) | Self::GuildNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Contention { .. } | Self::Store(_) | Self::Internal(_) => {
                ErrorKind::Infrastructure
            }
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }
}
