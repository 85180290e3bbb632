//! CSV-to-JSON transform over local scratch files.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::data_type::DataType;
use crate::error::TransformResult;
use crate::records::{CsvRow, OutputRecord};

/// Read a CSV file with a header row and project every row into `data_type`.
///
/// Row order is preserved. The input file is left untouched.
pub fn records_from_path(
    path: impl AsRef<Path>,
    data_type: DataType,
) -> TransformResult<Vec<OutputRecord>> {
    let file = File::open(path)?;
    records_from_reader(file, data_type)
}

/// Same as [`records_from_path`] over any reader.
pub fn records_from_reader<R: Read>(
    reader: R,
    data_type: DataType,
) -> TransformResult<Vec<OutputRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = CsvRow::new(&headers, &record);
        records.push(OutputRecord::from_row(data_type, &row));
    }

    Ok(records)
}

/// Write records as a pretty-printed JSON array, replacing any existing file.
pub fn write_records_json(
    path: impl AsRef<Path>,
    records: &[OutputRecord],
) -> TransformResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Convert `csv_path` into a JSON array at `json_path`, returning the record count.
pub fn convert_csv_file(
    csv_path: impl AsRef<Path>,
    json_path: impl AsRef<Path>,
    data_type: DataType,
) -> TransformResult<usize> {
    let records = records_from_path(csv_path, data_type)?;
    write_records_json(json_path, &records)?;
    Ok(records.len())
}
