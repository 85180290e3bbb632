pub const UPLOADS_SEGMENT: &str = "uploads/";
pub const CONVERTED_SEGMENT: &str = "converted/";
pub const CSV_EXTENSION: &str = ".csv";
pub const JSON_EXTENSION: &str = ".json";

/// Whether the key names a CSV upload. The suffix match is case-sensitive.
pub fn is_csv_key(key: &str) -> bool {
    key.ends_with(CSV_EXTENSION)
}

/// Destination key for the JSON produced from `source_key`.
///
/// The first `uploads/` becomes `converted/` and a trailing `.csv` becomes
/// `.json`. Keys without `uploads/` only get the extension swapped.
pub fn converted_object_key(source_key: &str) -> String {
    let relocated = source_key.replacen(UPLOADS_SEGMENT, CONVERTED_SEGMENT, 1);
    match relocated.strip_suffix(CSV_EXTENSION) {
        Some(stem) => format!("{stem}{JSON_EXTENSION}"),
        None => relocated,
    }
}
