//! # Catalog Registry
//!
//! Validated, ID-indexed view over a `CatalogFile`.

use super::entities::{Arena, CardDefinition, CatalogFile, ItemGrant, ItemKind, ShopItem};
use super::errors::CatalogError;
use shared_types::{ArenaId, CardId, School};
use std::collections::{BTreeMap, BTreeSet};

/// Cards a player can receive from chests at their current arena.
///
/// Ordered by `CardId` so that a seeded draw always lands on the same card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardPool {
    cards: Vec<CardId>,
}

impl CardPool {
    pub fn new(mut cards: Vec<CardId>) -> Self {
        cards.sort();
        cards.dedup();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at a drawn index.
    pub fn get(&self, index: usize) -> Option<&CardId> {
        self.cards.get(index)
    }

    pub fn ids(&self) -> &[CardId] {
        &self.cards
    }
}

/// Read-only reference tables.
#[derive(Clone, Debug)]
pub struct Catalog {
    cards: BTreeMap<CardId, CardDefinition>,
    arenas: BTreeMap<ArenaId, Arena>,
    shop: BTreeMap<(ItemKind, String), ShopItem>,
}

impl Catalog {
    /// Builds the registry, rejecting inconsistent reference data.
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut cards = BTreeMap::new();
        for card in file.cards {
            if cards.contains_key(&card.id) {
                return Err(CatalogError::DuplicateId {
                    table: "card",
                    id: card.id.to_string(),
                });
            }
            cards.insert(card.id.clone(), card);
        }

        let known_schools: BTreeSet<&School> = cards.values().map(|c| &c.school).collect();

        let mut arenas = BTreeMap::new();
        for arena in file.arenas {
            if arenas.contains_key(&arena.id) {
                return Err(CatalogError::DuplicateId {
                    table: "arena",
                    id: arena.id.to_string(),
                });
            }
            if let Some(school) = arena.schools.iter().find(|s| !known_schools.contains(s)) {
                return Err(CatalogError::UnknownSchool {
                    arena_id: arena.id,
                    school: school.to_string(),
                });
            }
            arenas.insert(arena.id, arena);
        }

        if arenas.is_empty() {
            return Err(CatalogError::NoArenas);
        }

        let mut previous_threshold = 0;
        for arena in arenas.values() {
            if arena.trophy_threshold < previous_threshold {
                return Err(CatalogError::ThresholdOrder {
                    arena_id: arena.id,
                    threshold: arena.trophy_threshold,
                });
            }
            previous_threshold = arena.trophy_threshold;
        }

        let mut shop = BTreeMap::new();
        for item in file.shop {
            validate_shop_item(&item, &cards)?;
            let key = (item.kind, item.id.clone());
            if shop.contains_key(&key) {
                return Err(CatalogError::DuplicateId {
                    table: "shop",
                    id: item.id,
                });
            }
            shop.insert(key, item);
        }

        Ok(Self {
            cards,
            arenas,
            shop,
        })
    }

    pub fn card(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    pub fn arena(&self, id: ArenaId) -> Option<&Arena> {
        self.arenas.get(&id)
    }

    /// Arenas in id order.
    pub fn arenas(&self) -> impl Iterator<Item = &Arena> {
        self.arenas.values()
    }

    /// Arena assigned to brand-new players.
    pub fn starting_arena(&self) -> ArenaId {
        // Construction guarantees at least one arena.
        self.arenas.keys().next().copied().unwrap_or_default()
    }

    /// Highest arena whose threshold the trophy count has reached.
    pub fn arena_for_trophies(&self, trophies: u32) -> ArenaId {
        self.arenas
            .values()
            .filter(|a| a.trophy_threshold <= trophies)
            .map(|a| a.id)
            .max()
            .unwrap_or_else(|| self.starting_arena())
    }

    /// Union of cards whose school belongs to any arena with
    /// `arena.id <= current_arena`.
    pub fn card_pool(&self, current_arena: ArenaId) -> CardPool {
        let schools: BTreeSet<&School> = self
            .arenas
            .range(..=current_arena)
            .flat_map(|(_, arena)| arena.schools.iter())
            .collect();

        CardPool::new(
            self.cards
                .values()
                .filter(|card| schools.contains(&card.school))
                .map(|card| card.id.clone())
                .collect(),
        )
    }

    pub fn shop_item(&self, kind: ItemKind, item_id: &str) -> Option<&ShopItem> {
        self.shop.get(&(kind, item_id.to_string()))
    }

    pub fn shop_items(&self) -> impl Iterator<Item = &ShopItem> {
        self.shop.values()
    }
}

fn validate_shop_item(
    item: &ShopItem,
    cards: &BTreeMap<CardId, CardDefinition>,
) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidShopItem {
        item_id: item.id.clone(),
        reason: reason.to_string(),
    };

    if item.quantity == 0 {
        return Err(invalid("quantity must be positive"));
    }

    match (&item.kind, &item.grant) {
        (ItemKind::Philosopher, ItemGrant::Card { card_id }) => {
            if !cards.contains_key(card_id) {
                return Err(invalid("grants an unknown card"));
            }
        }
        (ItemKind::Currency, ItemGrant::Currency { .. }) => {}
        _ => return Err(invalid("grant does not match item type")),
    }
    Ok(())
}
