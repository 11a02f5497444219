//! # Transaction Coordinator
//!
//! Runs a pure body `Fn(Snapshot) -> Result<(Snapshot, T), ProgressError>`
//! as an optimistic transaction:
//!
//! 1. Read every document the operation touches, with its version
//! 2. Run the body against the in-memory snapshot
//! 3. Commit the dirty documents, guarded by the versions read in step 1
//! 4. On `StoreError::Conflict`, start over from step 1
//!
//! Domain errors abort immediately and are never retried. A body that
//! writes nothing commits nothing.

use super::snapshot::Snapshot;
use crate::domain::{ProgressError, StoreError};
use crate::ports::{DocPath, DocumentStore};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct TransactionCoordinator<S> {
    store: Arc<S>,
    max_attempts: u32,
}

impl<S: DocumentStore> TransactionCoordinator<S> {
    pub fn new(store: Arc<S>, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Reads the documents at `paths` into a fresh snapshot.
    pub async fn read(&self, paths: &[DocPath]) -> Result<Snapshot, ProgressError> {
        let mut snapshot = Snapshot::default();
        for path in paths {
            match self.store.get(path).await? {
                Some(doc) => snapshot.record(path.clone(), Some(doc.version), Some(doc.data)),
                None => snapshot.record(path.clone(), None, None),
            }
        }
        Ok(snapshot)
    }

    /// Executes `body` until it commits, fails, or runs out of attempts.
    pub async fn run<T, F>(&self, op: &'static str, paths: &[DocPath], body: F) -> Result<T, ProgressError>
    where
        T: Send,
        F: Fn(Snapshot) -> Result<(Snapshot, T), ProgressError> + Send,
    {
        for attempt in 1..=self.max_attempts {
            let snapshot = self.read(paths).await?;

            let (snapshot, output) = match body(snapshot) {
                Ok(result) => result,
                Err(e) => {
                    debug!(op, error = %e, "[ath-02] transaction aborted");
                    return Err(e);
                }
            };

            if !snapshot.is_dirty() {
                return Ok(output);
            }

            match self.store.commit(snapshot.into_batch()).await {
                Ok(()) => {
                    debug!(op, attempt, "[ath-02] transaction committed");
                    return Ok(output);
                }
                Err(StoreError::Conflict { path }) => {
                    debug!(op, attempt, %path, "[ath-02] write conflict, retrying");
                    tokio::task::yield_now().await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            op,
            attempts = self.max_attempts,
            "[ath-02] transaction abandoned after repeated conflicts"
        );
        Err(ProgressError::Contention {
            attempts: self.max_attempts,
        })
    }
}
