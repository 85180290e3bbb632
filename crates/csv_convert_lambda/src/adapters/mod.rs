//! Service seams used by the conversion handler, with their AWS SDK backings.

pub mod object_store;
pub mod parameter_store;
pub mod queue;
