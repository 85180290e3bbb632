use thiserror::Error;

use crate::runtime::contract::EventError;
use crate::runtime::error::TransformError;

/// Failure of one conversion stage. Any variant aborts the remaining stages.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("parameter lookup failed: {0}")]
    Config(String),

    #[error("malformed trigger event: {0}")]
    Event(#[from] EventError),

    #[error("storage transfer failed: {0}")]
    Storage(String),

    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("queue notification failed: {0}")]
    Queue(String),
}

impl ConvertError {
    /// Short stage label used in log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Event(_) => "event",
            Self::Storage(_) => "storage",
            Self::Transform(_) => "transform",
            Self::Queue(_) => "queue",
        }
    }
}
