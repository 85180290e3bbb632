//! AWS-oriented adapters and handler for the CSV-to-JSON upload converter.
//!
//! This crate owns runtime integration details (the Lambda handler, storage,
//! parameter and queue adapters) and exposes a single runtime module boundary
//! for the contract, record and object key primitives.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod runtime;
