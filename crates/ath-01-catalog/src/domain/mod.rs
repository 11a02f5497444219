//! # Domain Module
//!
//! Catalog entities, the ID-indexed registry, and load errors.

pub mod entities;
pub mod errors;
pub mod registry;

pub use entities::*;
pub use errors::*;
pub use registry::*;
