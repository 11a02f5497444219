//! # Shared Types Crate
//!
//! Identifiers and closed enumerations used across the Athenaeum workspace.
//!
//! ## Design Principles
//!
//! - **Validated at the boundary**: string identifiers arriving from HTTP or
//!   catalog files are parsed into newtypes once; inner layers never see raw
//!   strings.
//! - **Closed enums**: currencies are a closed set. Unknown symbols are
//!   rejected on parse instead of flowing through as ad hoc strings.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
