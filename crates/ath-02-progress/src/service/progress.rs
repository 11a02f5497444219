//! # Progress Service
//!
//! `ProgressApi` implementation. Each operation:
//!
//! - validates its input and resolves catalog entries before any store access
//! - reads `now` and draws a random seed once, outside the transaction body
//! - hands a pure body to the `TransactionCoordinator`
//!
//! Because time, seed and generated ids are fixed before the body runs, a
//! body re-executed after a conflict produces exactly the same writes.

use super::coordinator::TransactionCoordinator;
use super::snapshot::Snapshot;
use crate::config::EngineConfig;
use crate::domain::{
    chest, guild, shop, transfer, ChestRewards, ChestType, DonationPayload, Guild,
    PlayerProgress, ProgressError, PurchaseReceipt,
};
use crate::ports::{
    DocPath, DocumentStore, OsSeedSource, ProgressApi, SeedSource, SystemTimeSource, TimeSource,
};
use ath_01_catalog::{Catalog, ItemKind};
use async_trait::async_trait;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shared_types::{GuildId, PlayerId};
use std::sync::Arc;
use tracing::info;

/// The per-player transactional game-state engine.
pub struct ProgressService<S> {
    coordinator: TransactionCoordinator<S>,
    catalog: Arc<Catalog>,
    config: EngineConfig,
    clock: Arc<dyn TimeSource>,
    seeds: Arc<dyn SeedSource>,
}

impl<S: DocumentStore> ProgressService<S> {
    /// Creates a service backed by the system clock and OS randomness.
    pub fn new(store: Arc<S>, catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        Self {
            coordinator: TransactionCoordinator::new(store, config.max_transaction_attempts),
            catalog,
            config,
            clock: Arc::new(SystemTimeSource),
            seeds: Arc::new(OsSeedSource),
        }
    }

    pub fn with_time_source(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_seed_source(mut self, seeds: Arc<dyn SeedSource>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<S> {
        self.coordinator.store()
    }

    /// Runs a read-modify-write over one existing player document.
    async fn update_player<T, F>(&self, op: &'static str, player: &PlayerId, f: F) -> Result<T, ProgressError>
    where
        T: Send,
        F: Fn(&mut PlayerProgress) -> Result<T, ProgressError> + Send + Sync,
    {
        let path = DocPath::Player(player.clone());
        self.coordinator
            .run(op, std::slice::from_ref(&path), |mut snapshot| {
                let mut progress = load_player(&snapshot, player)?;
                let output = f(&mut progress)?;
                snapshot.put(&path, &progress)?;
                Ok((snapshot, output))
            })
            .await
    }
}

fn load_player(snapshot: &Snapshot, player: &PlayerId) -> Result<PlayerProgress, ProgressError> {
    snapshot
        .get(&DocPath::Player(player.clone()))?
        .ok_or_else(|| ProgressError::UserNotFound(player.clone()))
}

#[async_trait]
impl<S: DocumentStore + 'static> ProgressApi for ProgressService<S> {
    async fn get_progress(&self, player: &PlayerId) -> Result<Option<PlayerProgress>, ProgressError> {
        let now = self.clock.now();
        let snapshot = self
            .coordinator
            .read(&[DocPath::Player(player.clone())])
            .await?;
        let mut progress: Option<PlayerProgress> = snapshot.get(&DocPath::Player(player.clone()))?;
        if let Some(progress) = progress.as_mut() {
            chest::refresh_readiness(progress, now);
        }
        Ok(progress)
    }

    async fn sync_progress(&self, player: &PlayerId) -> Result<PlayerProgress, ProgressError> {
        let now = self.clock.now();
        let path = DocPath::Player(player.clone());
        let starting_arena = self.catalog.starting_arena();
        let starting_balances = self.config.starting_balances();

        let (progress, created) = self
            .coordinator
            .run("sync_progress", std::slice::from_ref(&path), |mut snapshot| {
                match snapshot.get::<PlayerProgress>(&path)? {
                    Some(mut progress) => {
                        if chest::refresh_readiness(&mut progress, now) {
                            snapshot.put(&path, &progress)?;
                        }
                        Ok((snapshot, (progress, false)))
                    }
                    None => {
                        let progress = PlayerProgress::new(
                            player.clone(),
                            starting_arena,
                            self.config.chest_slot_count,
                            &starting_balances,
                        );
                        snapshot.put(&path, &progress)?;
                        Ok((snapshot, (progress, true)))
                    }
                }
            })
            .await?;
        if created {
            info!(player_id = %player, "[ath-02] created player progress");
        }
        Ok(progress)
    }

    async fn award_chest(&self, player: &PlayerId, chest_type: ChestType) -> Result<usize, ProgressError> {
        let slot = self
            .update_player("award_chest", player, |progress| {
                chest::award_chest(progress, chest_type)
            })
            .await?;
        info!(player_id = %player, slot, chest = %chest_type, "[ath-02] chest awarded");
        Ok(slot)
    }

    async fn add_trophies(&self, player: &PlayerId, amount: u32) -> Result<PlayerProgress, ProgressError> {
        if amount == 0 {
            return Err(ProgressError::invalid("amount must be greater than zero"));
        }
        let catalog = self.catalog.clone();
        self.update_player("add_trophies", player, move |progress| {
            progress.trophies = progress.trophies.saturating_add(amount);
            let arena = catalog.arena_for_trophies(progress.trophies);
            progress.current_arena_id = progress.current_arena_id.max(arena);
            Ok(progress.clone())
        })
        .await
    }

    async fn unlock_chest(&self, player: &PlayerId, slot: usize) -> Result<(), ProgressError> {
        let now = self.clock.now();
        let chest = self
            .update_player("unlock_chest", player, |progress| {
                chest::unlock_chest(progress, slot, now)
            })
            .await?;
        info!(
            player_id = %player,
            slot,
            ready_at = ?chest.unlock_end_time,
            "[ath-02] chest unlocking"
        );
        Ok(())
    }

    async fn open_chest(&self, player: &PlayerId, slot: usize) -> Result<ChestRewards, ProgressError> {
        let now = self.clock.now();
        let seed = self.seeds.next_seed();
        let catalog = self.catalog.clone();

        let rewards = self
            .update_player("open_chest", player, move |progress| {
                chest::refresh_readiness(progress, now);
                let pool = catalog.card_pool(progress.current_arena_id);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                chest::open_chest(progress, slot, now, &pool, &mut rng)
            })
            .await?;
        info!(
            player_id = %player,
            slot,
            scrolls = rewards.scrolls,
            books = rewards.books,
            cards = rewards.cards.len(),
            "[ath-02] chest opened"
        );
        Ok(rewards)
    }

    async fn buy_item(
        &self,
        player: &PlayerId,
        kind: ItemKind,
        item_id: &str,
    ) -> Result<PurchaseReceipt, ProgressError> {
        let item = self
            .catalog
            .shop_item(kind, item_id)
            .cloned()
            .ok_or_else(|| ProgressError::ItemNotFound {
                kind,
                item_id: item_id.to_string(),
            })?;

        let receipt = self
            .update_player("buy_item", player, |progress| shop::buy_item(progress, &item))
            .await?;
        info!(player_id = %player, item = %item.id, kind = %kind, "[ath-02] item purchased");
        Ok(receipt)
    }

    async fn donate(
        &self,
        sender: &PlayerId,
        receiver: &PlayerId,
        payload: DonationPayload,
    ) -> Result<(), ProgressError> {
        transfer::validate_donation(sender, receiver, &payload)?;
        let sender_path = DocPath::Player(sender.clone());
        let receiver_path = DocPath::Player(receiver.clone());

        self.coordinator
            .run(
                "donate",
                &[sender_path.clone(), receiver_path.clone()],
                |mut snapshot| {
                    let mut from = load_player(&snapshot, sender)?;
                    let mut to = load_player(&snapshot, receiver)?;
                    transfer::donate(&mut from, &mut to, &payload)?;
                    snapshot.put(&sender_path, &from)?;
                    snapshot.put(&receiver_path, &to)?;
                    Ok((snapshot, ()))
                },
            )
            .await?;
        info!(from = %sender, to = %receiver, ?payload, "[ath-02] donation completed");
        Ok(())
    }

    async fn create_guild(
        &self,
        player: &PlayerId,
        name: &str,
        description: &str,
    ) -> Result<Guild, ProgressError> {
        guild::validate_guild_fields(name, description)?;
        let id = GuildId::generate();
        let player_path = DocPath::Player(player.clone());
        let guild_path = DocPath::Guild(id);

        let created = self
            .coordinator
            .run(
                "create_guild",
                &[player_path.clone(), guild_path.clone()],
                |mut snapshot| {
                    let mut leader = load_player(&snapshot, player)?;
                    let created = guild::create_guild(&mut leader, id, name, description)?;
                    snapshot.put(&player_path, &leader)?;
                    snapshot.put(&guild_path, &created)?;
                    Ok((snapshot, created))
                },
            )
            .await?;
        info!(player_id = %player, guild_id = %id, "[ath-02] guild created");
        Ok(created)
    }

    async fn join_guild(&self, player: &PlayerId, guild_id: GuildId) -> Result<Guild, ProgressError> {
        let player_path = DocPath::Player(player.clone());
        let guild_path = DocPath::Guild(guild_id);

        self.coordinator
            .run(
                "join_guild",
                &[player_path.clone(), guild_path.clone()],
                |mut snapshot| {
                    let mut progress = load_player(&snapshot, player)?;
                    let mut joined: Guild = snapshot
                        .get(&guild_path)?
                        .ok_or(ProgressError::GuildNotFound(guild_id))?;
                    if guild::join_guild(&mut progress, &mut joined)? {
                        snapshot.put(&player_path, &progress)?;
                        snapshot.put(&guild_path, &joined)?;
                    }
                    Ok((snapshot, joined))
                },
            )
            .await
    }

    async fn get_guild(&self, guild_id: GuildId) -> Result<Option<Guild>, ProgressError> {
        let path = DocPath::Guild(guild_id);
        let snapshot = self.coordinator.read(std::slice::from_ref(&path)).await?;
        snapshot.get(&path)
    }
}
