//! Input row source — a thin CSV reader.
//!
//! Every field stays raw text; no type inference ever happens here. The
//! only hard failures are structural: unreadable input or missing required
//! *columns*. Missing *values* inside a row are the pipeline's business.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::InputError;
use crate::pipeline::types::Row;

/// Read rows from CSV text. The first record is the header.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>, InputError> {
    let mut csv = csv::Reader::from_reader(reader);

    let headers = csv.headers()?.clone();
    if headers.is_empty() {
        return Err(InputError::MissingHeader);
    }

    let missing: Vec<String> = Row::REQUIRED_COLUMNS
        .into_iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(InputError::MissingColumns { columns: missing });
    }

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(Row::from_fields(fields));
    }

    debug!(rows = rows.len(), "Loaded input rows");
    Ok(rows)
}

/// Read rows from a CSV file on disk.
pub fn read_rows_from_path(path: &Path) -> Result<Vec<Row>, InputError> {
    let file = File::open(path)?;
    read_rows(BufReader::new(file))
}
