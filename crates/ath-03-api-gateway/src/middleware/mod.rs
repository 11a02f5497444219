//! Request extraction shared by all handlers.

pub mod identity;

pub use identity::CallerIdentity;
