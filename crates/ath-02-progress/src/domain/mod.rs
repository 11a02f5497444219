//! Domain layer: pure functions over in-memory documents.

pub mod chest;
pub mod collection;
pub mod entities;
pub mod errors;
pub mod guild;
pub mod ledger;
pub mod rewards;
pub mod shop;
pub mod transfer;

pub use entities::*;
pub use errors::*;
