//! # Domain Entities
//!
//! Persisted documents (`PlayerProgress`, `Guild`) and the values that flow
//! through chest, shop and donation operations.
//!
//! Field names serialize in camelCase; that is the document format stored
//! in the `DocumentStore`.

use serde::{Deserialize, Serialize};
use shared_types::{ArenaId, CardId, Currency, GuildId, PlayerId, Timestamp};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Currency balances keyed by symbol. Absent entries read as zero.
pub type Balances = BTreeMap<Currency, u64>;

/// Owned cards keyed by catalog id.
pub type Collection = BTreeMap<CardId, CollectionEntry>;

/// Reward tier of a chest. Each tier has a fixed unlock duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChestType {
    #[serde(rename = "Papiro")]
    Papiro,
    #[serde(rename = "Tomo")]
    Tomo,
    #[serde(rename = "Obra Rara")]
    ObraRara,
    #[serde(rename = "Lendário")]
    Lendario,
}

impl ChestType {
    pub const ALL: [ChestType; 4] = [
        ChestType::Papiro,
        ChestType::Tomo,
        ChestType::ObraRara,
        ChestType::Lendario,
    ];

    /// Unlock duration in seconds.
    pub fn unlock_duration_secs(&self) -> u64 {
        match self {
            ChestType::Papiro => 3_600,
            ChestType::Tomo => 10_800,
            ChestType::ObraRara => 43_200,
            ChestType::Lendario => 86_400,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChestType::Papiro => "Papiro",
            ChestType::Tomo => "Tomo",
            ChestType::ObraRara => "Obra Rara",
            ChestType::Lendario => "Lendário",
        }
    }
}

impl fmt::Display for ChestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ChestType::ALL
            .into_iter()
            .find(|t| t.name().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown chest type: {}", s))
    }
}

/// Chest lifecycle state. An empty slot is `None`, never a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChestStatus {
    Locked,
    Unlocking,
    Ready,
}

/// A reward container occupying a chest slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chest {
    #[serde(rename = "type")]
    pub chest_type: ChestType,
    pub status: ChestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_start_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_end_time: Option<Timestamp>,
}

impl Chest {
    /// A freshly awarded, locked chest.
    pub fn locked(chest_type: ChestType) -> Self {
        Self {
            chest_type,
            status: ChestStatus::Locked,
            unlock_start_time: None,
            unlock_end_time: None,
        }
    }

    /// Whether the chest may be opened at `now`.
    pub fn is_ready_at(&self, now: Timestamp) -> bool {
        match self.status {
            ChestStatus::Ready => true,
            ChestStatus::Unlocking => self.unlock_end_time.is_some_and(|end| now >= end),
            ChestStatus::Locked => false,
        }
    }
}

/// Ownership record for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub level: u32,
    pub count: u64,
}

impl Default for CollectionEntry {
    fn default() -> Self {
        Self { level: 1, count: 0 }
    }
}

/// One player's persisted progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProgress {
    pub player_id: PlayerId,
    pub currencies: Balances,
    pub trophies: u32,
    pub current_arena_id: ArenaId,
    pub chest_slots: Vec<Option<Chest>>,
    #[serde(default)]
    pub collection: Collection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
}

impl PlayerProgress {
    /// A new player document with every currency present.
    pub fn new(
        player_id: PlayerId,
        starting_arena: ArenaId,
        slot_count: usize,
        starting_balances: &Balances,
    ) -> Self {
        let mut currencies: Balances = Currency::ALL.iter().map(|c| (*c, 0)).collect();
        currencies.extend(starting_balances.iter().map(|(c, v)| (*c, *v)));

        Self {
            player_id,
            currencies,
            trophies: 0,
            current_arena_id: starting_arena,
            chest_slots: vec![None; slot_count],
            collection: Collection::new(),
            guild_id: None,
        }
    }

    pub fn balance(&self, currency: Currency) -> u64 {
        self.currencies.get(&currency).copied().unwrap_or(0)
    }

    pub fn card_count(&self, card_id: &CardId) -> u64 {
        self.collection.get(card_id).map(|e| e.count).unwrap_or(0)
    }

    /// Index of the slot currently in `unlocking`, if any.
    pub fn unlocking_slot(&self) -> Option<usize> {
        self.chest_slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|chest| chest.status == ChestStatus::Unlocking)
        })
    }
}

/// A guild document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    pub description: String,
    pub leader_id: PlayerId,
    pub members: BTreeSet<PlayerId>,
}

/// Cards granted by a single draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGrant {
    pub card_id: CardId,
    pub count: u64,
}

/// Loot produced by opening a chest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChestRewards {
    pub scrolls: u64,
    pub books: u64,
    pub cards: Vec<CardGrant>,
}

/// What a donation moves between two players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DonationPayload {
    Currency { currency: Currency, amount: u64 },
    Card {
        #[serde(rename = "cardId")]
        card_id: CardId,
    },
}

/// Outcome of a shop purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub item_id: String,
    /// Soft currency debited, `None` for real-money SKUs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<(Currency, u64)>,
    pub granted_quantity: u64,
}
