//! Gazetteer resource backing the full entity tagger.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::NerError;

const BUILTIN_GAZETTEER: &str = include_str!("en_news.toml");

/// Known surface forms per category, plus the patterns' vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gazetteer {
    /// Resource name reported in logs.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub places: Vec<String>,
    #[serde(default)]
    pub nationalities: Vec<String>,
    #[serde(default)]
    pub people: Vec<String>,
    /// Honorifics and offices that precede a person's name.
    #[serde(default)]
    pub person_titles: Vec<String>,
    /// Trailing words that turn a capitalized phrase into an organization.
    #[serde(default)]
    pub org_suffixes: Vec<String>,
    /// Capitalized words never treated as part of a person's name.
    #[serde(default)]
    pub name_stopwords: Vec<String>,
}

impl Gazetteer {
    /// The gazetteer compiled into the binary.
    pub fn builtin() -> Result<Self, NerError> {
        toml::from_str(BUILTIN_GAZETTEER).map_err(|e| NerError::GazetteerParse(e.to_string()))
    }

    /// Load a gazetteer file. TOML by default; `.json`, `.yaml` and `.yml` by extension.
    pub fn from_path(path: &Path) -> Result<Self, NerError> {
        if !path.exists() {
            return Err(NerError::GazetteerNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        let mut gazetteer: Gazetteer = match ext {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| NerError::GazetteerParse(e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| NerError::GazetteerParse(e.to_string()))?,
            _ => toml::from_str(&contents).map_err(|e| NerError::GazetteerParse(e.to_string()))?,
        };

        if gazetteer.name.is_empty() {
            gazetteer.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("custom")
                .to_string();
        }
        Ok(gazetteer)
    }

    /// True when there is nothing to match entities against.
    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
            && self.places.is_empty()
            && self.nationalities.is_empty()
            && self.people.is_empty()
            && self.person_titles.is_empty()
            && self.org_suffixes.is_empty()
    }
}
