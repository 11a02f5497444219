//! # Chest Lifecycle
//!
//! Per-slot state machine. Readiness is evaluated lazily from wall-clock
//! time; there is no background timer.
//!
//! ```text
//! [Locked] ──unlock──→ [Unlocking] ──now >= unlockEndTime──→ [Ready] ──open──→ (empty)
//! ```
//!
//! At most one slot may be `Unlocking` at a time.

use super::entities::{Chest, ChestRewards, ChestStatus, ChestType, PlayerProgress};
use super::errors::ProgressError;
use super::rewards;
use ath_01_catalog::CardPool;
use rand::Rng;
use shared_types::Timestamp;

/// Promotes every elapsed `Unlocking` chest to `Ready`. Returns whether
/// anything changed.
pub fn refresh_readiness(progress: &mut PlayerProgress, now: Timestamp) -> bool {
    let mut changed = false;
    for chest in progress.chest_slots.iter_mut().flatten() {
        if chest.status == ChestStatus::Unlocking && chest.is_ready_at(now) {
            chest.status = ChestStatus::Ready;
            changed = true;
        }
    }
    changed
}

/// Places a locked chest in the first empty slot and returns its index.
pub fn award_chest(progress: &mut PlayerProgress, chest_type: ChestType) -> Result<usize, ProgressError> {
    let index = progress
        .chest_slots
        .iter()
        .position(Option::is_none)
        .ok_or(ProgressError::NoFreeChestSlot)?;
    progress.chest_slots[index] = Some(Chest::locked(chest_type));
    Ok(index)
}

/// Starts unlocking the chest at `index`.
pub fn unlock_chest(
    progress: &mut PlayerProgress,
    index: usize,
    now: Timestamp,
) -> Result<Chest, ProgressError> {
    refresh_readiness(progress, now);

    let status = progress
        .chest_slots
        .get(index)
        .and_then(Option::as_ref)
        .map(|chest| chest.status)
        .ok_or(ProgressError::NoChestAtIndex { index })?;

    if status != ChestStatus::Locked {
        return Err(ProgressError::ChestNotLocked { index });
    }
    if let Some(other) = progress.unlocking_slot() {
        return Err(ProgressError::AnotherChestUnlocking { index: other });
    }

    let chest = progress.chest_slots[index]
        .as_mut()
        .ok_or(ProgressError::NoChestAtIndex { index })?;
    chest.status = ChestStatus::Unlocking;
    chest.unlock_start_time = Some(now);
    chest.unlock_end_time = Some(now.saturating_add(chest.chest_type.unlock_duration_secs()));
    Ok(chest.clone())
}

/// Opens a ready chest: rolls its loot, applies it, and empties the slot.
pub fn open_chest<R: Rng + ?Sized>(
    progress: &mut PlayerProgress,
    index: usize,
    now: Timestamp,
    pool: &CardPool,
    rng: &mut R,
) -> Result<ChestRewards, ProgressError> {
    let chest = progress
        .chest_slots
        .get(index)
        .and_then(Option::as_ref)
        .ok_or(ProgressError::NoChestAtIndex { index })?;

    if !chest.is_ready_at(now) {
        return Err(ProgressError::ChestNotReady {
            index,
            ready_at: chest.unlock_end_time,
        });
    }

    let loot = rewards::generate_rewards(chest.chest_type, pool, rng);
    rewards::apply_rewards(progress, &loot)?;
    progress.chest_slots[index] = None;
    refresh_readiness(progress, now);
    Ok(loot)
}
