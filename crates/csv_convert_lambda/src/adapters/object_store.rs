use std::fs;
use std::path::Path;

use aws_sdk_s3::primitives::ByteStream;

/// Object storage addressed by bucket and key.
pub trait ObjectStore: Send + Sync {
    /// Fetch an object into `destination`, replacing any previous file content.
    fn download_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<(), String>;

    /// Store the file at `source` under `bucket`/`key`, replacing any existing object.
    fn upload_object(&self, source: &Path, bucket: &str, key: &str) -> Result<(), String>;
}

pub struct S3ObjectStore {
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

impl ObjectStore for S3ObjectStore {
    fn download_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<(), String> {
        let bucket = bucket.to_string();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        let bytes = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_object()
                    .bucket(bucket)
                    .key(object_key)
                    .send()
                    .await
                    .map_err(|error| format!("failed to read object from s3: {error}"))?;
                output
                    .body
                    .collect()
                    .await
                    .map(|data| data.into_bytes())
                    .map_err(|error| format!("failed to read s3 object body: {error}"))
            })
        })?;

        fs::write(destination, &bytes).map_err(|error| {
            format!(
                "failed to write scratch file '{}': {error}",
                destination.display()
            )
        })
    }

    fn upload_object(&self, source: &Path, bucket: &str, key: &str) -> Result<(), String> {
        let body_bytes = fs::read(source).map_err(|error| {
            format!("failed to read scratch file '{}': {error}", source.display())
        })?;
        let bucket = bucket.to_string();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }
}
