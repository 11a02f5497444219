//! # ath-02-progress
//!
//! The per-player transactional game-state engine: chest lifecycle,
//! currency ledger, card collection, guilds and cross-player donations.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | At most one chest `unlocking` per player | `domain/chest.rs` - `unlock_chest()` |
//! | Balances never negative | `domain/ledger.rs` - `debit()` on `u64` |
//! | Card counts never negative | `domain/collection.rs` - `consume()` |
//! | Donations conserve currency | `domain/transfer.rs` - debit + credit in one commit |
//! | Failed operations write nothing | `service/coordinator.rs` - commit only after `Ok` |
//!
//! ## Chest Lifecycle
//!
//! ```text
//! [Locked] ──unlock──→ [Unlocking] ──now >= unlockEndTime──→ [Ready] ──open──→ (empty)
//! ```
//!
//! Readiness is computed from wall-clock time whenever a chest operation
//! runs; there is no background timer.
//!
//! ## Optimistic Transactions
//!
//! Each operation reads its documents with their versions, runs a pure body
//! over the in-memory copies, and commits a batch conditioned on those
//! versions. A conflicting write by another request makes the store reject
//! the batch and the coordinator re-runs the body from fresh reads. Time,
//! random seed and generated ids are fixed before the first attempt, so a
//! re-run is indistinguishable from a first run.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - InMemoryDocumentStore, ConflictInjectingStore      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - ProgressApi                                │
//! │  ports/outbound.rs - DocumentStore, TimeSource, SeedSource      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/ - TransactionCoordinator, ProgressService             │
//! │  domain/  - chest, rewards, ledger, collection, shop,           │
//! │             transfer, guild                                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{ConflictInjectingStore, InMemoryDocumentStore};
pub use config::{ConfigError, EngineConfig};
pub use domain::*;
pub use ports::*;
pub use service::{ProgressService, Snapshot, TransactionCoordinator};
