//! # Integration Tests
//!
//! Every test builds its own engine over an `InMemoryDocumentStore`, a
//! `MockTimeSource` and a `FixedSeedSource`, so runs are deterministic
//! apart from task scheduling.

pub mod concurrency;
pub mod http;
pub mod scenarios;
