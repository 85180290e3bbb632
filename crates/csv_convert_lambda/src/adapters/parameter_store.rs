/// Key/value settings store that may hold encrypted values.
pub trait ParameterStore: Send + Sync {
    /// Current decrypted value of `name`. No caching: every call is a fresh lookup.
    fn decrypted_parameter(&self, name: &str) -> Result<String, String>;
}

pub struct SsmParameterStore {
    ssm_client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(ssm_client: aws_sdk_ssm::Client) -> Self {
        Self { ssm_client }
    }
}

impl ParameterStore for SsmParameterStore {
    fn decrypted_parameter(&self, name: &str) -> Result<String, String> {
        let parameter_name = name.to_string();
        let client = self.ssm_client.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .get_parameter()
                    .name(parameter_name)
                    .with_decryption(true)
                    .send()
                    .await
                    .map_err(|error| format!("failed to read parameter from ssm: {error}"))
            })
        })?;

        output
            .parameter
            .and_then(|parameter| parameter.value)
            .ok_or_else(|| format!("parameter '{name}' has no value"))
    }
}
