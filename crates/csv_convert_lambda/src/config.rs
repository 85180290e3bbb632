use std::path::PathBuf;

pub const DEFAULT_QUEUE_URL_PARAMETER: &str = "/course-backend/SQS_QUEUE_URL";
pub const QUEUE_URL_PARAMETER_ENV: &str = "QUEUE_URL_PARAMETER";
pub const SCRATCH_DIR_ENV: &str = "SCRATCH_DIR";

const INPUT_SCRATCH_FILE: &str = "input.csv";
const OUTPUT_SCRATCH_FILE: &str = "output.json";

/// Settings read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Parameter-store name holding the notification queue URL.
    pub queue_url_parameter: String,
    /// Directory for the downloaded CSV and the generated JSON.
    pub scratch_dir: PathBuf,
}

impl ConverterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            queue_url_parameter: non_blank(QUEUE_URL_PARAMETER_ENV)
                .unwrap_or_else(|| DEFAULT_QUEUE_URL_PARAMETER.to_string()),
            scratch_dir: non_blank(SCRATCH_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
        }
    }

    pub fn input_csv_path(&self) -> PathBuf {
        self.scratch_dir.join(INPUT_SCRATCH_FILE)
    }

    pub fn output_json_path(&self) -> PathBuf {
        self.scratch_dir.join(OUTPUT_SCRATCH_FILE)
    }
}
