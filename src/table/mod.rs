//! Tabular input and output for headline datasets.
//!
//! Tables arrive as plain or gzip-compressed CSV with a header row. The
//! reader keeps every field as raw text; deciding what counts as missing is
//! left to `filter`, and choosing the text column to `column`.

mod column;
mod filter;
mod reader;
mod writer;

use thiserror::Error;

pub use column::{resolve_column, select_column, ColumnSelection};
pub use filter::{drop_missing, is_missing, present_values, DEFAULT_NA_VALUES};
pub use reader::{read_table, read_table_from, Compression, ReadOptions};
pub use writer::{
    format_sentiment, render_results, write_results, write_results_to_path, EntitiesFormat,
    WriteOptions, ENTITIES_COLUMN, RESULTS_FILENAME, SENTIMENT_COLUMN,
};

/// Errors from reading, selecting, or writing tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed table: {0}")]
    Malformed(String),

    #[error("Table has no header row")]
    MissingHeader,

    #[error("Unknown column '{name}' (available: {available})")]
    UnknownColumn { name: String, available: String },

    #[error("Failed to write results: {0}")]
    Write(String),
}

/// An in-memory table: header names plus raw records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Number of data records (header excluded).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
