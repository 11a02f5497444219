//! # Athenaeum Test Suite
//!
//! Cross-crate tests that drive the progress engine the way the gateway and
//! node runtime do.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs    # End-to-end chest, shop and donation flows
//!     ├── concurrency.rs  # Invariants under concurrent transactions
//!     └── http.rs         # Gateway routes over the real engine
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ath-tests
//! cargo test -p ath-tests integration::concurrency::
//! ```

pub mod integration;
