use std::fs;
use std::time::Instant;

use serde_json::Value;
use tracing::{error, info};

use crate::adapters::object_store::ObjectStore;
use crate::adapters::parameter_store::ParameterStore;
use crate::adapters::queue::MessageQueue;
use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::runtime::contract::{first_uploaded_object, InvocationResponse, QueueNotification};
use crate::runtime::data_type::{classify_object_key, DataType};
use crate::runtime::error::TransformError;
use crate::runtime::object_keys::{converted_object_key, is_csv_key};
use crate::runtime::transform::convert_csv_file;

/// Service clients the conversion talks to, built once per execution environment.
#[derive(Clone, Copy)]
pub struct ConvertServices<'a> {
    pub object_store: &'a dyn ObjectStore,
    pub parameter_store: &'a dyn ParameterStore,
    pub queue: &'a dyn MessageQueue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// JSON uploaded and the queue notified.
    Converted {
        bucket: String,
        json_key: String,
        data_type: DataType,
        records: usize,
        message_id: Option<String>,
    },
    /// The object is not a CSV file; nothing was touched.
    Skipped { key: String },
}

/// Run one invocation and map its outcome onto the platform response.
///
/// A skipped object yields `None`. Every failure yields the same generic
/// response; the detail only reaches the log.
pub fn handle_upload_event(
    event: &Value,
    config: &ConverterConfig,
    services: ConvertServices<'_>,
) -> Option<InvocationResponse> {
    let started_at = Instant::now();
    match convert_upload(event, config, services) {
        Ok(ConvertOutcome::Converted {
            bucket,
            json_key,
            data_type,
            records,
            message_id,
        }) => {
            info!(
                bucket = %bucket,
                json_key = %json_key,
                data_type = %data_type,
                records,
                message_id = message_id.as_deref().unwrap_or_default(),
                duration_ms = started_at.elapsed().as_millis() as u64,
                "upload converted"
            );
            Some(InvocationResponse::converted(&json_key))
        }
        Ok(ConvertOutcome::Skipped { .. }) => None,
        Err(error) => {
            error!(
                stage = error.stage(),
                error = %error,
                duration_ms = started_at.elapsed().as_millis() as u64,
                "upload conversion failed"
            );
            Some(InvocationResponse::failed())
        }
    }
}

/// Resolve the queue, validate the input, transform, upload, then notify.
///
/// Stages run strictly in that order and the first failure stops the rest.
/// A failure after the upload leaves the JSON object in place without a
/// queue message.
pub fn convert_upload(
    event: &Value,
    config: &ConverterConfig,
    services: ConvertServices<'_>,
) -> Result<ConvertOutcome, ConvertError> {
    let queue_url = services
        .parameter_store
        .decrypted_parameter(&config.queue_url_parameter)
        .map_err(ConvertError::Config)?;

    let object = first_uploaded_object(event)?;
    if !is_csv_key(&object.key) {
        info!(bucket = %object.bucket, key = %object.key, "skipping non-CSV object");
        return Ok(ConvertOutcome::Skipped { key: object.key });
    }

    let data_type =
        classify_object_key(&object.key).ok_or_else(|| TransformError::UnknownDataType {
            key: object.key.clone(),
        })?;

    fs::create_dir_all(&config.scratch_dir).map_err(|error| {
        ConvertError::Storage(format!(
            "failed to prepare scratch dir '{}': {error}",
            config.scratch_dir.display()
        ))
    })?;
    let csv_path = config.input_csv_path();
    let json_path = config.output_json_path();

    services
        .object_store
        .download_object(&object.bucket, &object.key, &csv_path)
        .map_err(ConvertError::Storage)?;
    info!(bucket = %object.bucket, key = %object.key, "downloaded");

    let records = convert_csv_file(&csv_path, &json_path, data_type)?;
    info!(data_type = %data_type, records, "converted rows");

    let json_key = converted_object_key(&object.key);
    services
        .object_store
        .upload_object(&json_path, &object.bucket, &json_key)
        .map_err(ConvertError::Storage)?;
    info!(bucket = %object.bucket, json_key = %json_key, "uploaded");

    let notification = QueueNotification {
        bucket: object.bucket.clone(),
        key: json_key.clone(),
        data_type,
    };
    let body = notification.to_message_body().map_err(|error| {
        ConvertError::Queue(format!("failed to serialize notification: {error}"))
    })?;
    let message_id = services
        .queue
        .send_message(&queue_url, &body)
        .map_err(ConvertError::Queue)?;
    info!(message_id = message_id.as_deref().unwrap_or_default(), "queue notified");

    Ok(ConvertOutcome::Converted {
        bucket: object.bucket,
        json_key,
        data_type,
        records,
        message_id,
    })
}
