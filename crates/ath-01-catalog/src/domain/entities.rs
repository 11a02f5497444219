//! # Catalog Entities
//!
//! Definitions as they appear in the catalog JSON (camelCase fields).

use serde::{Deserialize, Serialize};
use shared_types::{ArenaId, CardId, Currency, School};
use std::fmt;
use std::str::FromStr;

/// A collectible philosopher card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub school: School,
}

/// A content-gating tier. Reaching `trophy_threshold` unlocks the arena and
/// adds its schools to the reward pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arena {
    pub id: ArenaId,
    pub name: String,
    pub trophy_threshold: u32,
    pub schools: Vec<School>,
}

/// Shop section an item is listed under. Also the lookup key used by
/// purchase requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Philosopher,
    Currency,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Philosopher => f.write_str("philosopher"),
            ItemKind::Currency => f.write_str("currency"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "philosopher" => Ok(ItemKind::Philosopher),
            "currency" => Ok(ItemKind::Currency),
            other => Err(UnknownItemKind(other.to_string())),
        }
    }
}

/// Raised when a request names an item kind the shop does not sell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown item type: {0}")]
pub struct UnknownItemKind(pub String);

/// What a shop item is paid with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCurrency {
    /// Real-money SKU. Payment is settled outside this system.
    Real,
    Scrolls,
    Books,
}

impl CostCurrency {
    /// The in-game currency to debit, or `None` for real-money SKUs.
    pub fn soft_currency(&self) -> Option<Currency> {
        match self {
            CostCurrency::Real => None,
            CostCurrency::Scrolls => Some(Currency::Scrolls),
            CostCurrency::Books => Some(Currency::Books),
        }
    }
}

/// Price of a shop item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub currency: CostCurrency,
    pub amount: u64,
}

/// What buying an item grants. The target is always explicit: currency
/// packs name the currency they credit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemGrant {
    Card {
        #[serde(rename = "cardId")]
        card_id: CardId,
    },
    Currency { currency: Currency },
}

/// A purchasable shop entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub quantity: u64,
    pub cost: Cost,
    pub grant: ItemGrant,
}

/// On-disk catalog layout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub cards: Vec<CardDefinition>,
    pub arenas: Vec<Arena>,
    #[serde(default)]
    pub shop: Vec<ShopItem>,
}
