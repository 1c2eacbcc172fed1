//! AWS-oriented adapters and handlers for the bucket notification index relay.
//!
//! This crate owns runtime integration details (Lambda entry point, durable
//! table adapters, logging setup) and exposes a single runtime module boundary
//! for the contract, transform, and error primitives.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod runtime;
pub mod telemetry;
