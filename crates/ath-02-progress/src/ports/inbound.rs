//! Inbound (Driving) API for the progress engine.
//!
//! Every operation runs as one optimistic transaction against the player
//! document(s) it touches. A returned error guarantees no writes.

use crate::domain::{
    ChestRewards, ChestType, DonationPayload, Guild, PlayerProgress, ProgressError,
    PurchaseReceipt,
};
use ath_01_catalog::ItemKind;
use async_trait::async_trait;
use shared_types::{GuildId, PlayerId};

/// Primary API used by the gateway.
#[async_trait]
pub trait ProgressApi: Send + Sync {
    /// Read-only lookup. `None` when the player has never synced.
    async fn get_progress(&self, player: &PlayerId) -> Result<Option<PlayerProgress>, ProgressError>;

    /// Returns the player's document, creating it on first call.
    async fn sync_progress(&self, player: &PlayerId) -> Result<PlayerProgress, ProgressError>;

    /// Places a locked chest in the first free slot; returns the slot index.
    async fn award_chest(&self, player: &PlayerId, chest_type: ChestType) -> Result<usize, ProgressError>;

    /// Adds trophies and advances the arena if a threshold was crossed.
    async fn add_trophies(&self, player: &PlayerId, amount: u32) -> Result<PlayerProgress, ProgressError>;

    async fn unlock_chest(&self, player: &PlayerId, slot: usize) -> Result<(), ProgressError>;

    async fn open_chest(&self, player: &PlayerId, slot: usize) -> Result<ChestRewards, ProgressError>;

    async fn buy_item(
        &self,
        player: &PlayerId,
        kind: ItemKind,
        item_id: &str,
    ) -> Result<PurchaseReceipt, ProgressError>;

    async fn donate(
        &self,
        sender: &PlayerId,
        receiver: &PlayerId,
        payload: DonationPayload,
    ) -> Result<(), ProgressError>;

    async fn create_guild(
        &self,
        player: &PlayerId,
        name: &str,
        description: &str,
    ) -> Result<Guild, ProgressError>;

    async fn join_guild(&self, player: &PlayerId, guild: GuildId) -> Result<Guild, ProgressError>;

    async fn get_guild(&self, guild: GuildId) -> Result<Option<Guild>, ProgressError>;
}
