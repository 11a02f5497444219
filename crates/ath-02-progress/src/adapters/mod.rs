//! Adapters for the outbound ports.

pub mod memory_store;

pub use memory_store::{ConflictInjectingStore, InMemoryDocumentStore};
