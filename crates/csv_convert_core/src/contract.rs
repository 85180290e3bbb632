use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::data_type::DataType;

pub const SUCCESS_STATUS_CODE: u16 = 200;
pub const FAILURE_STATUS_CODE: u16 = 500;
pub const FAILURE_BODY: &str = "Error processing file.";

/// Bucket and key of the object an upload notification points at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedObject {
    pub bucket: String,
    pub key: String,
}

/// Message published once a converted JSON object is in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueNotification {
    pub bucket: String,
    pub key: String,
    pub data_type: DataType,
}

impl QueueNotification {
    pub fn to_message_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Result handed back to the invoking platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn converted(json_key: &str) -> Self {
        Self {
            status_code: SUCCESS_STATUS_CODE,
            body: format!("CSV converted to JSON and uploaded to {json_key}, SQS notified."),
        }
    }

    pub fn failed() -> Self {
        Self {
            status_code: FAILURE_STATUS_CODE,
            body: FAILURE_BODY.to_string(),
        }
    }
}

/// The trigger payload lacks the fields needed to locate the uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EventError {
    message: String,
}

impl EventError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Extract the first record's bucket and key from an S3 notification.
///
/// Further records are ignored; one invocation handles one object.
pub fn first_uploaded_object(event: &Value) -> Result<UploadedObject, EventError> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or_else(|| EventError::new("S3 event must include Records array"))?;
    let record = records
        .first()
        .ok_or_else(|| EventError::new("S3 event Records array is empty"))?;

    let bucket = record
        .pointer("/s3/bucket/name")
        .and_then(Value::as_str)
        .ok_or_else(|| EventError::new("S3 record must include s3.bucket.name string"))?;
    let key = record
        .pointer("/s3/object/key")
        .and_then(Value::as_str)
        .ok_or_else(|| EventError::new("S3 record must include s3.object.key string"))?;

    Ok(UploadedObject {
        bucket: bucket.to_string(),
        key: key.to_string(),
    })
}
