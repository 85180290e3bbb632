use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use csv_convert_lambda::adapters::object_store::ObjectStore;
use csv_convert_lambda::adapters::parameter_store::ParameterStore;
use csv_convert_lambda::adapters::queue::MessageQueue;
use csv_convert_lambda::config::ConverterConfig;
use csv_convert_lambda::handlers::convert::{handle_upload_event, ConvertServices};
use csv_convert_lambda::runtime::contract::{InvocationResponse, QueueNotification};
use csv_convert_lambda::runtime::data_type::DataType;
use serde_json::{json, Value};
use tempfile::TempDir;

const QUEUE_PARAMETER: &str = "/course-backend/SQS_QUEUE_URL";
const QUEUE_URL: &str = "https://sqs.ap-south-1.amazonaws.com/123456789012/converted-files";

struct QueueUrlParameter;

impl ParameterStore for QueueUrlParameter {
    fn decrypted_parameter(&self, name: &str) -> Result<String, String> {
        if name == QUEUE_PARAMETER {
            Ok(QUEUE_URL.to_string())
        } else {
            Err(format!("parameter '{name}' not found"))
        }
    }
}

#[derive(Default)]
struct Bucket {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl Bucket {
    fn put(&self, key: &str, body: &str) {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .insert(key.to_string(), body.as_bytes().to_vec());
    }

    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().expect("poisoned mutex").get(key).cloned()
    }
}

/// Single-bucket store keyed as `bucket/key`.
#[derive(Default)]
struct SchoolDataStore {
    bucket: Bucket,
}

impl ObjectStore for SchoolDataStore {
    fn download_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<(), String> {
        let body = self
            .bucket
            .get(&format!("{bucket}/{key}"))
            .ok_or_else(|| format!("no such key: {bucket}/{key}"))?;
        fs::write(destination, body).map_err(|error| error.to_string())
    }

    fn upload_object(&self, source: &Path, bucket: &str, key: &str) -> Result<(), String> {
        let body = fs::read_to_string(source).map_err(|error| error.to_string())?;
        self.bucket.put(&format!("{bucket}/{key}"), &body);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingQueue {
    sent: Mutex<Vec<(String, String)>>,
}

impl MessageQueue for RecordingQueue {
    fn send_message(&self, queue_url: &str, body: &str) -> Result<Option<String>, String> {
        self.sent
            .lock()
            .expect("poisoned mutex")
            .push((queue_url.to_string(), body.to_string()));
        Ok(None)
    }
}

fn s3_put_event(bucket: &str, key: &str) -> Value {
    json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "ap-south-1",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "s3SchemaVersion": "1.0",
                "bucket": {"name": bucket, "arn": format!("arn:aws:s3:::{bucket}")},
                "object": {"key": key, "size": 64}
            }
        }]
    })
}

#[test]
fn classroom_upload_is_converted_and_announced() {
    let scratch = TempDir::new().expect("temp dir");
    let config = ConverterConfig {
        queue_url_parameter: QUEUE_PARAMETER.to_string(),
        scratch_dir: scratch.path().to_path_buf(),
    };
    let store = SchoolDataStore::default();
    store.bucket.put(
        "school-data/uploads/classrooms.csv",
        "room_number,capacity,isLab\n101,30,false\n102,20,true\n",
    );
    let queue = RecordingQueue::default();
    let services = ConvertServices {
        object_store: &store,
        parameter_store: &QueueUrlParameter,
        queue: &queue,
    };

    let response = handle_upload_event(
        &s3_put_event("school-data", "uploads/classrooms.csv"),
        &config,
        services,
    );

    assert_eq!(
        response,
        Some(InvocationResponse::converted("converted/classrooms.json"))
    );

    let uploaded = store
        .bucket
        .get("school-data/converted/classrooms.json")
        .expect("converted json should be stored");
    let uploaded: Value = serde_json::from_slice(&uploaded).expect("stored json parses");
    assert_eq!(
        uploaded,
        json!([
            {"roomNumber": "101", "capacity": "30", "isLab": "false"},
            {"roomNumber": "102", "capacity": "20", "isLab": "true"}
        ])
    );

    let sent = queue.sent.lock().expect("poisoned mutex").clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, QUEUE_URL);
    let notification: QueueNotification =
        serde_json::from_str(&sent[0].1).expect("message body parses");
    assert_eq!(
        notification,
        QueueNotification {
            bucket: "school-data".to_string(),
            key: "converted/classrooms.json".to_string(),
            data_type: DataType::Classrooms,
        }
    );
}

#[test]
fn student_subjects_keep_empty_cells_raw() {
    let scratch = TempDir::new().expect("temp dir");
    let config = ConverterConfig {
        queue_url_parameter: QUEUE_PARAMETER.to_string(),
        scratch_dir: scratch.path().to_path_buf(),
    };
    let store = SchoolDataStore::default();
    store.bucket.put(
        "school-data/data/students.csv",
        "name,subjects,grade,age\nAda,Math|Science|Art,10,15\nBo,,9,14\n",
    );
    let queue = RecordingQueue::default();
    let services = ConvertServices {
        object_store: &store,
        parameter_store: &QueueUrlParameter,
        queue: &queue,
    };

    let response = handle_upload_event(
        &s3_put_event("school-data", "data/students.csv"),
        &config,
        services,
    );

    assert_eq!(
        response,
        Some(InvocationResponse::converted("data/students.json"))
    );
    let uploaded = store
        .bucket
        .get("school-data/data/students.json")
        .expect("converted json should be stored");
    let uploaded: Value = serde_json::from_slice(&uploaded).expect("stored json parses");
    assert_eq!(
        uploaded,
        json!([
            {"name": "Ada", "subjects": ["Math", "Science", "Art"], "grade": "10", "age": "15"},
            {"name": "Bo", "subjects": "", "grade": "9", "age": "14"}
        ])
    );
}
