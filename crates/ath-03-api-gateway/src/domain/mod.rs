//! Gateway domain: configuration, errors and request/response bodies.

pub mod config;
pub mod error;
pub mod requests;
pub mod responses;
