//! # In-Memory Document Store
//!
//! Versioned document map with compare-and-commit semantics. Every commit
//! checks all preconditions and applies all writes under one write lock,
//! so concurrent transactions observe the same conflict rules a
//! cross-process document database would enforce.

use crate::domain::StoreError;
use crate::ports::{CommitBatch, DocPath, DocumentStore, VersionedDocument};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use tracing::trace;

/// Thread-safe versioned document store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocPath, VersionedDocument>>,
    unavailable: AtomicBool,
    commits: AtomicU64,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an outage: every call fails with `Unavailable` while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successfully applied batches.
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    /// Writes a document unconditionally, bumping its version.
    pub fn put(&self, path: DocPath, data: Value) {
        let mut documents = self.documents.write();
        let version = documents.get(&path).map(|d| d.version + 1).unwrap_or(1);
        documents.insert(path, VersionedDocument { version, data });
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, path: &DocPath) -> Result<Option<VersionedDocument>, StoreError> {
        self.check_available()?;
        Ok(self.documents.read().get(path).cloned())
    }

    async fn commit(&self, batch: CommitBatch) -> Result<(), StoreError> {
        self.check_available()?;
        let mut documents = self.documents.write();

        for (path, expected) in &batch.preconditions {
            let current = documents.get(path).map(|d| d.version);
            if current != *expected {
                trace!(%path, ?expected, ?current, "precondition failed");
                return Err(StoreError::Conflict {
                    path: path.to_string(),
                });
            }
        }

        for (path, data) in batch.writes {
            let version = documents.get(&path).map(|d| d.version + 1).unwrap_or(1);
            documents.insert(path, VersionedDocument { version, data });
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Wraps a store and rejects the first `n` commits with a conflict,
/// emulating a concurrent writer winning the race.
#[derive(Debug)]
pub struct ConflictInjectingStore<S> {
    inner: S,
    remaining: AtomicU32,
    attempts: AtomicU32,
}

impl<S: DocumentStore> ConflictInjectingStore<S> {
    pub fn new(inner: S, conflicts: u32) -> Self {
        Self {
            inner,
            remaining: AtomicU32::new(conflicts),
            attempts: AtomicU32::new(0),
        }
    }

    /// Queues `conflicts` more rejections.
    pub fn arm(&self, conflicts: u32) {
        self.remaining.store(conflicts, Ordering::SeqCst);
    }

    /// Total commit calls seen, including rejected ones.
    pub fn commit_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for ConflictInjectingStore<S> {
    async fn get(&self, path: &DocPath) -> Result<Option<VersionedDocument>, StoreError> {
        self.inner.get(path).await
    }

    async fn commit(&self, batch: CommitBatch) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let injected = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            let path = batch
                .preconditions
                .first()
                .map(|(p, _)| p.to_string())
                .unwrap_or_default();
            return Err(StoreError::Conflict { path });
        }
        self.inner.commit(batch).await
    }
}
