/// Message queue the converter notifies once a JSON object is in place.
pub trait MessageQueue: Send + Sync {
    /// Send one message, returning the id assigned by the queue when it reports one.
    fn send_message(&self, queue_url: &str, body: &str) -> Result<Option<String>, String>;
}

pub struct SqsMessageQueue {
    sqs_client: aws_sdk_sqs::Client,
}

impl SqsMessageQueue {
    pub fn new(sqs_client: aws_sdk_sqs::Client) -> Self {
        Self { sqs_client }
    }
}

impl MessageQueue for SqsMessageQueue {
    fn send_message(&self, queue_url: &str, body: &str) -> Result<Option<String>, String> {
        let target_queue_url = queue_url.to_string();
        let message_body = body.to_string();
        let client = self.sqs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message()
                    .queue_url(target_queue_url)
                    .message_body(message_body)
                    .send()
                    .await
                    .map(|output| output.message_id)
                    .map_err(|error| format!("failed to send message to sqs: {error}"))
            })
        })
    }
}
