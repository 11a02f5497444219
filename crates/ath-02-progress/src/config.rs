//! Engine configuration with validation.

use crate::domain::Balances;
use serde::{Deserialize, Serialize};
use shared_types::Currency;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_transaction_attempts must be at least 1")]
    NoTransactionAttempts,

    #[error("chest_slot_count must be at least 1")]
    NoChestSlots,
}

/// Progress engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Attempts per transaction before reporting contention.
    pub max_transaction_attempts: u32,
    /// Scrolls granted to a brand-new player.
    pub starting_scrolls: u64,
    /// Books granted to a brand-new player.
    pub starting_books: u64,
    /// Size of every player's chest slot array.
    pub chest_slot_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_transaction_attempts: 5,
            starting_scrolls: 100,
            starting_books: 5,
            chest_slot_count: 4,
        }
    }
}

impl EngineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_transaction_attempts == 0 {
            return Err(ConfigError::NoTransactionAttempts);
        }
        if self.chest_slot_count == 0 {
            return Err(ConfigError::NoChestSlots);
        }
        Ok(())
    }

    pub fn starting_balances(&self) -> Balances {
        [
            (Currency::Scrolls, self.starting_scrolls),
            (Currency::Books, self.starting_books),
        ]
        .into_iter()
        .collect()
    }
}
