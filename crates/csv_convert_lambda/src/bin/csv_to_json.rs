use csv_convert_lambda::adapters::object_store::S3ObjectStore;
use csv_convert_lambda::adapters::parameter_store::SsmParameterStore;
use csv_convert_lambda::adapters::queue::SqsMessageQueue;
use csv_convert_lambda::config::ConverterConfig;
use csv_convert_lambda::handlers::convert::{handle_upload_event, ConvertServices};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

async fn handle_request(
    event: LambdaEvent<Value>,
    config: &ConverterConfig,
    services: ConvertServices<'_>,
) -> Result<Value, Error> {
    let response = handle_upload_event(&event.payload, config, services);
    serde_json::to_value(response)
        .map_err(|error| Error::from(format!("failed to serialize invocation response: {error}")))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        // CloudWatch stamps every line on ingestion.
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = ConverterConfig::from_env();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let object_store = S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config));
    let parameter_store = SsmParameterStore::new(aws_sdk_ssm::Client::new(&aws_config));
    let queue = SqsMessageQueue::new(aws_sdk_sqs::Client::new(&aws_config));
    let services = ConvertServices {
        object_store: &object_store,
        parameter_store: &parameter_store,
        queue: &queue,
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &config, services))).await
}
