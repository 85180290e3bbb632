use serde::{Deserialize, Serialize};

/// Record shape selected for an uploaded CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Students,
    Teachers,
    Classrooms,
}

/// Classification order; the first marker found in the key wins.
const CLASSIFICATION_ORDER: [DataType; 3] =
    [DataType::Teachers, DataType::Classrooms, DataType::Students];

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Teachers => "teachers",
            Self::Classrooms => "classrooms",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infer the data type from an object key by case-insensitive substring match.
///
/// Returns `None` when the key mentions none of the known types.
pub fn classify_object_key(key: &str) -> Option<DataType> {
    let lowered = key.to_lowercase();
    CLASSIFICATION_ORDER
        .into_iter()
        .find(|data_type| lowered.contains(data_type.as_str()))
}
