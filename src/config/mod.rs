//! Configuration management using the prefer crate.
//!
//! A config file (`headlines.toml`, `.yaml`, `.json`, ...) is discovered by
//! prefer or given explicitly; its values are folded into [`Settings`], and
//! CLI flags override them last.

mod loader;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::table::EntitiesFormat;

pub use loader::{load_settings_with_options, LoadOptions};
pub use settings::{Settings, DEFAULT_PREVIEW_ROWS};

/// Name prefer uses to discover config files.
pub const CONFIG_NAME: &str = "headlines";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config: {message}")]
    Parse { format: &'static str, message: String },

    #[error("Invalid delimiter '{0}': expected a single ASCII character or \"tab\"")]
    InvalidDelimiter(String),
}

/// `[input]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter: one ASCII character, or "tab".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_na_values: Option<bool>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Output field delimiter; comma unless set, whatever the input uses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities_format: Option<EntitiesFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_rows: Option<usize>,
}

/// `[ner]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Path to an external gazetteer file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gazetteer: Option<String>,
}

/// `[sentiment]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Path to a lexicon overrides file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<String>,
}

/// Configuration file structure. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Text column to annotate, bypassing detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ner: NerConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer for discovery.
    /// Falls back to defaults when nothing is found or the file is unusable.
    pub async fn load() -> Self {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            warn!("Ignoring config {}: {}", path.display(), e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => {
                debug!("No {} config file found, using defaults", CONFIG_NAME);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file path.
    /// The format follows the extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            })?,
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            })?,
            _ => serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            })?,
        };

        config.source_path = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Directory of the config file, if it came from one.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved against `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths (config file dir or CWD).
    pub fn apply_to_settings(
        &self,
        settings: &mut Settings,
        base_dir: &Path,
    ) -> Result<(), ConfigError> {
        if let Some(ref column) = self.column {
            settings.column = Some(column.clone());
        }

        if let Some(ref delimiter) = self.input.delimiter {
            settings.delimiter = parse_delimiter(delimiter)?;
        }
        if let Some(default_na_values) = self.input.default_na_values {
            settings.default_na_values = default_na_values;
        }

        if let Some(ref path) = self.output.path {
            settings.output_path = self.resolve_path(path, base_dir);
        }
        if let Some(ref delimiter) = self.output.delimiter {
            settings.output_delimiter = parse_delimiter(delimiter)?;
        }
        if let Some(format) = self.output.entities_format {
            settings.entities_format = format;
        }
        if let Some(selected_only) = self.output.selected_only {
            settings.selected_only = selected_only;
        }
        if let Some(rows) = self.output.preview_rows {
            settings.preview_rows = rows;
        }

        if let Some(enabled) = self.ner.enabled {
            settings.ner_enabled = enabled;
        }
        if let Some(ref gazetteer) = self.ner.gazetteer {
            settings.gazetteer_path = Some(self.resolve_path(gazetteer, base_dir));
        }

        if let Some(ref lexicon) = self.sentiment.lexicon {
            settings.lexicon_path = Some(self.resolve_path(lexicon, base_dir));
        }

        Ok(())
    }
}

/// Parse a delimiter setting: a single ASCII character, `\t`, or "tab".
pub fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        v if v.len() == 1 && v.is_ascii() => Ok(v.as_bytes()[0]),
        v => Err(ConfigError::InvalidDelimiter(v.to_string())),
    }
}
