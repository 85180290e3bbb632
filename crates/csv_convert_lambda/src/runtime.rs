pub use csv_convert_core::{contract, data_type, error, object_keys, records, transform};
