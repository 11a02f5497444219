//! # Transaction Snapshot
//!
//! In-memory copy of the documents a transaction read. Bodies receive a
//! snapshot and return a (possibly modified) snapshot; the coordinator
//! turns it into a `CommitBatch` guarded by the versions that were read.

use crate::domain::{ProgressError, StoreError};
use crate::ports::{CommitBatch, DocPath};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    version: Option<u64>,
    data: Option<Value>,
    dirty: bool,
}

/// Documents read by one transaction attempt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    entries: BTreeMap<DocPath, Entry>,
}

impl Snapshot {
    /// Records a document as read at `version` (`None` = absent).
    pub(crate) fn record(&mut self, path: DocPath, version: Option<u64>, data: Option<Value>) {
        self.entries.insert(
            path,
            Entry {
                version,
                data,
                dirty: false,
            },
        );
    }

    /// Typed view of a document read by this transaction.
    pub fn get<T: DeserializeOwned>(&self, path: &DocPath) -> Result<Option<T>, ProgressError> {
        let entry = self.entry(path)?;
        entry
            .data
            .as_ref()
            .map(|data| {
                serde_json::from_value(data.clone())
                    .map_err(|e| {
                        ProgressError::from(StoreError::Serialization(format!("{}: {}", path, e)))
                    })
            })
            .transpose()
    }

    /// Stages a write. Only documents read by this transaction may be written.
    pub fn put<T: Serialize>(&mut self, path: &DocPath, value: &T) -> Result<(), ProgressError> {
        let data = serde_json::to_value(value)
            .map_err(|e| StoreError::Serialization(format!("{}: {}", path, e)))?;
        let entry = self
            .entries
            .get_mut(path)
            .ok_or_else(|| ProgressError::Internal(format!("write to unread document {}", path)))?;
        entry.data = Some(data);
        entry.dirty = true;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.entries.values().any(|e| e.dirty)
    }

    /// Every read becomes a precondition; only dirty entries are written.
    pub fn into_batch(self) -> CommitBatch {
        let mut batch = CommitBatch::default();
        for (path, entry) in self.entries {
            if entry.dirty {
                if let Some(data) = entry.data {
                    batch.writes.push((path.clone(), data));
                }
            }
            batch.preconditions.push((path, entry.version));
        }
        batch
    }

    fn entry(&self, path: &DocPath) -> Result<&Entry, ProgressError> {
        self.entries
            .get(path)
            .ok_or_else(|| ProgressError::Internal(format!("read of unread document {}", path)))
    }
}
