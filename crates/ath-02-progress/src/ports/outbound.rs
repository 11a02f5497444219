//! Outbound (Driven) ports for the progress engine.
//!
//! - `DocumentStore`: versioned document persistence with an atomic,
//!   precondition-checked commit (optimistic concurrency)
//! - `TimeSource`: wall-clock seconds, abstracted for deterministic tests
//! - `SeedSource`: per-call random seeds for replay-safe reward rolls

use crate::domain::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use shared_types::{GuildId, PlayerId, Timestamp};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Location of a document in the store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocPath {
    Player(PlayerId),
    Guild(GuildId),
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocPath::Player(id) => write!(f, "players/{}", id),
            DocPath::Guild(id) => write!(f, "guilds/{}", id),
        }
    }
}

/// A stored document with the version it was read at.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionedDocument {
    pub version: u64,
    pub data: Value,
}

/// One atomic write set.
///
/// The store applies `writes` only if every precondition still holds:
/// `Some(v)` means the document is still at version `v`, `None` means it
/// still does not exist. Otherwise the whole batch is rejected with
/// `StoreError::Conflict`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommitBatch {
    pub preconditions: Vec<(DocPath, Option<u64>)>,
    pub writes: Vec<(DocPath, Value)>,
}

impl CommitBatch {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Document persistence port.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document, `None` when absent.
    async fn get(&self, path: &DocPath) -> Result<Option<VersionedDocument>, StoreError>;

    /// Applies a batch atomically or not at all.
    async fn commit(&self, batch: CommitBatch) -> Result<(), StoreError>;
}

/// Time source abstraction. Seconds since the Unix epoch.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Settable clock for tests.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

/// Supplies one seed per operation. The seed is drawn before the
/// transaction starts, so every retry replays the same random sequence.
pub trait SeedSource: Send + Sync {
    fn next_seed(&self) -> u64;
}

/// Seeds from the thread-local OS-seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn next_seed(&self) -> u64 {
        rand::random()
    }
}

/// Deterministic seed sequence for tests: `base, base + 1, ...`.
#[derive(Debug, Default)]
pub struct FixedSeedSource {
    next: AtomicU64,
}

impl FixedSeedSource {
    pub fn new(base: u64) -> Self {
        Self {
            next: AtomicU64::new(base),
        }
    }
}

impl SeedSource for FixedSeedSource {
    fn next_seed(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}
