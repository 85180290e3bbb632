//! Shared CSV-to-JSON conversion domain primitives.
//!
//! This crate owns the deterministic parts of the conversion: data-type
//! classification, record shapes, the CSV transform, and object key rules.
//! It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod data_type;
pub mod error;
pub mod object_keys;
pub mod records;
pub mod transform;
