//! Domain primitives for the bucket notification index relay.
//!
//! This crate owns the notification/index-item contracts, the pure record
//! transformer, and the relay error taxonomy. It intentionally excludes AWS SDK
//! and Lambda runtime concerns.

pub mod contract;
pub mod error;
pub mod transform;
