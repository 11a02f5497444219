//! # Reward Generator
//!
//! Loot tables per chest tier. Generation draws only from the supplied
//! random source, so a seeded generator reproduces the same rewards when a
//! transaction body is re-executed.
//!
//! | Tier | Scrolls | Books | Cards |
//! |------|---------|-------|-------|
//! | Papiro | 10..=59 | 1..=5 | 50%: one card, count 1 |
//! | Tomo | 50..=199 | 5..=19 | two draws, count 1..=3 each |
//! | Obra Rara, Lendário | 100 | 10 | none |

use super::collection;
use super::entities::{CardGrant, ChestRewards, ChestType, PlayerProgress};
use super::errors::ProgressError;
use super::ledger;
use ath_01_catalog::CardPool;
use rand::Rng;
use shared_types::Currency;

/// Rolls the loot for one chest against the player's available card pool.
pub fn generate_rewards<R: Rng + ?Sized>(
    chest_type: ChestType,
    pool: &CardPool,
    rng: &mut R,
) -> ChestRewards {
    match chest_type {
        ChestType::Papiro => {
            let scrolls = rng.gen_range(10..=59);
            let books = rng.gen_range(1..=5);
            let mut cards = Vec::new();
            if rng.gen_bool(0.5) {
                if let Some(card_id) = draw(pool, rng) {
                    cards.push(CardGrant { card_id, count: 1 });
                }
            }
            ChestRewards {
                scrolls,
                books,
                cards,
            }
        }
        ChestType::Tomo => {
            let scrolls = rng.gen_range(50..=199);
            let books = rng.gen_range(5..=19);
            let mut cards = Vec::with_capacity(2);
            for _ in 0..2 {
                if let Some(card_id) = draw(pool, rng) {
                    let count = rng.gen_range(1..=3);
                    cards.push(CardGrant { card_id, count });
                }
            }
            ChestRewards {
                scrolls,
                books,
                cards,
            }
        }
        ChestType::ObraRara | ChestType::Lendario => ChestRewards {
            scrolls: 100,
            books: 10,
            cards: Vec::new(),
        },
    }
}

/// Uniform draw by index; the pool hands back the card's catalog id.
fn draw<R: Rng + ?Sized>(pool: &CardPool, rng: &mut R) -> Option<shared_types::CardId> {
    if pool.is_empty() {
        return None;
    }
    pool.get(rng.gen_range(0..pool.len())).cloned()
}

/// Credits currencies and grants cards from a reward summary.
pub fn apply_rewards(progress: &mut PlayerProgress, rewards: &ChestRewards) -> Result<(), ProgressError> {
    ledger::credit(&mut progress.currencies, Currency::Scrolls, rewards.scrolls)?;
    ledger::credit(&mut progress.currencies, Currency::Books, rewards.books)?;
    for grant in &rewards.cards {
        collection::grant(&mut progress.collection, &grant.card_id, grant.count)?;
    }
    Ok(())
}
