//! Runtime settings resolved from defaults, config files and CLI flags.

use std::path::PathBuf;

use crate::services::PipelineOptions;
use crate::table::{EntitiesFormat, ReadOptions, WriteOptions, RESULTS_FILENAME};

/// Rows shown in the CLI preview unless configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Explicit text column; detection runs when unset.
    pub column: Option<String>,
    /// Input field delimiter.
    pub delimiter: u8,
    /// Output field delimiter, independent of the input's.
    pub output_delimiter: u8,
    /// Treat `NA`, `null`, `N/A` and similar markers as missing.
    pub default_na_values: bool,
    /// Where the annotated table is written.
    pub output_path: PathBuf,
    pub entities_format: EntitiesFormat,
    /// Write only the text column plus `Sentiment` and `Entities`.
    pub selected_only: bool,
    pub preview_rows: usize,
    /// Disabled extraction uses the blank backend without a warning.
    pub ner_enabled: bool,
    /// External gazetteer; the built-in one is used when unset.
    pub gazetteer_path: Option<PathBuf>,
    /// Extra word polarities merged over the built-in lexicon.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            column: None,
            delimiter: b',',
            output_delimiter: b',',
            default_na_values: true,
            output_path: PathBuf::from(RESULTS_FILENAME),
            entities_format: EntitiesFormat::default(),
            selected_only: false,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            ner_enabled: true,
            gazetteer_path: None,
            lexicon_path: None,
        }
    }
}

impl Settings {
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            delimiter: self.delimiter,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            delimiter: self.output_delimiter,
            entities_format: self.entities_format,
            selected_only: self.selected_only,
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            read: self.read_options(),
            write: self.write_options(),
            default_na_values: self.default_na_values,
        }
    }
}
