//! # Cross-Player Transfer
//!
//! Donations move value between two in-memory documents. Both are written
//! in the same commit by the coordinator; on error neither is touched.

use super::collection;
use super::entities::{DonationPayload, PlayerProgress};
use super::errors::ProgressError;
use super::ledger;

/// Rejects malformed donations before any document is read.
pub fn validate_donation(
    sender: &shared_types::PlayerId,
    receiver: &shared_types::PlayerId,
    payload: &DonationPayload,
) -> Result<(), ProgressError> {
    if sender == receiver {
        return Err(ProgressError::invalid("cannot donate to yourself"));
    }
    if let DonationPayload::Currency { amount: 0, .. } = payload {
        return Err(ProgressError::invalid("amount must be greater than zero"));
    }
    Ok(())
}

/// Moves one donation from `sender` to `receiver`.
pub fn donate(
    sender: &mut PlayerProgress,
    receiver: &mut PlayerProgress,
    payload: &DonationPayload,
) -> Result<(), ProgressError> {
    validate_donation(&sender.player_id, &receiver.player_id, payload)?;

    match payload {
        DonationPayload::Currency { currency, amount } => {
            ledger::debit(&mut sender.currencies, *currency, *amount)?;
            ledger::credit(&mut receiver.currencies, *currency, *amount)?;
        }
        DonationPayload::Card { card_id } => {
            collection::consume(&mut sender.collection, card_id, 1)?;
            collection::grant(&mut receiver.collection, card_id, 1)?;
        }
    }
    Ok(())
}
