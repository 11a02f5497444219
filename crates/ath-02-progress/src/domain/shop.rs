//! # Shop Purchase
//!
//! Debit and grant happen against the same in-memory document, so either
//! both are committed or neither is.

use super::collection;
use super::entities::{PlayerProgress, PurchaseReceipt};
use super::errors::ProgressError;
use super::ledger;
use ath_01_catalog::{ItemGrant, ShopItem};

/// Charges the item's soft-currency cost (if any) and applies its grant.
pub fn buy_item(progress: &mut PlayerProgress, item: &ShopItem) -> Result<PurchaseReceipt, ProgressError> {
    let spent = item.cost.currency.soft_currency().map(|c| (c, item.cost.amount));
    if let Some((currency, amount)) = spent {
        ledger::debit(&mut progress.currencies, currency, amount)?;
    }

    match &item.grant {
        ItemGrant::Card { card_id } => {
            collection::grant(&mut progress.collection, card_id, item.quantity)?
        }
        ItemGrant::Currency { currency } => {
            ledger::credit(&mut progress.currencies, *currency, item.quantity)?
        }
    }

    Ok(PurchaseReceipt {
        item_id: item.id.clone(),
        spent,
        granted_quantity: item.quantity,
    })
}
