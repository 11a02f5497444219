//! # Collection Manager
//!
//! Card ownership ledger. Entries are created lazily at `level = 1,
//! count = 0` on first grant.

use super::entities::{Collection, CollectionEntry};
use super::errors::ProgressError;
use shared_types::CardId;

/// Adds `count` copies of a card.
pub fn grant(collection: &mut Collection, card_id: &CardId, count: u64) -> Result<(), ProgressError> {
    let entry = collection.entry(card_id.clone()).or_default();
    entry.count = entry
        .count
        .checked_add(count)
        .ok_or_else(|| ProgressError::Internal(format!("card count overflow for {}", card_id)))?;
    Ok(())
}

/// Removes `qty` copies, failing with `CardNotOwned` when fewer are owned.
pub fn consume(collection: &mut Collection, card_id: &CardId, qty: u64) -> Result<(), ProgressError> {
    let owned = collection.get(card_id).map(|e| e.count).unwrap_or(0);
    match collection.get_mut(card_id) {
        Some(CollectionEntry { count, .. }) if *count >= qty => {
            *count -= qty;
            Ok(())
        }
        _ => Err(ProgressError::CardNotOwned {
            card_id: card_id.clone(),
            required: qty,
            owned,
        }),
    }
}
