//! CSV loading with extension-based gzip dispatch.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use super::{Table, TableError};

/// Compression applied to an input file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    /// `.gz` (any case) means gzip; everything else is read as plain text.
    pub fn from_path(path: &Path) -> Self {
        let is_gzip = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
        if is_gzip {
            Compression::Gzip
        } else {
            Compression::None
        }
    }
}

/// Options for parsing delimited text.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Read a table from disk, decompressing `.gz` files on the fly.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table, TableError> {
    let file = File::open(path)?;
    let compression = Compression::from_path(path);
    debug!("Reading {} ({:?})", path.display(), compression);

    let table = match compression {
        Compression::Gzip => read_table_from(GzDecoder::new(BufReader::new(file)), options)?,
        Compression::None => read_table_from(BufReader::new(file), options)?,
    };

    debug!(
        "Loaded {} records with columns {:?}",
        table.len(),
        table.headers()
    );
    Ok(table)
}

/// Parse a table from any reader. The first record is the header.
///
/// Short records are padded with empty fields, which read as missing.
/// Records wider than the header, invalid UTF-8, and corrupt compressed
/// streams surface as `TableError::Malformed`; no partial table is returned.
pub fn read_table_from<R: Read>(reader: R, options: &ReadOptions) -> Result<Table, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| TableError::Malformed(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(TableError::MissingHeader);
    }

    let width = headers.len();
    let mut records = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| TableError::Malformed(e.to_string()))?;
        if record.len() > width {
            return Err(TableError::Malformed(format!(
                "record {} has {} fields, but the header has {}",
                index + 1,
                record.len(),
                width
            )));
        }
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        fields.resize(width, String::new());
        records.push(fields);
    }

    Ok(Table::new(headers, records))
}
