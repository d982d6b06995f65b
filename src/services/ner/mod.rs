//! Named Entity Recognition for news headlines.
//!
//! Provides a `NerBackend` trait for pluggable extraction backends, the
//! gazetteer-driven `NewsNerBackend`, and `BlankNerBackend`, a structurally
//! present backend that never finds anything. `load_ner_backend` decides once
//! at startup which of the two the session uses.

mod blank;
mod gazetteer;
mod news;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::Entity;

pub use blank::BlankNerBackend;
pub use gazetteer::Gazetteer;
pub use news::NewsNerBackend;

/// Errors from loading or running an entity backend.
#[derive(Debug, Error)]
pub enum NerError {
    #[error("Gazetteer not found: {0}")]
    GazetteerNotFound(String),

    #[error("Failed to parse gazetteer: {0}")]
    GazetteerParse(String),

    #[error("Gazetteer '{0}' has no entries")]
    EmptyGazetteer(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Entity categories, using the OntoNotes tag names common taggers emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Org,
    /// Countries, cities, states.
    Gpe,
    /// Nationalities, religious and political groups.
    Norp,
    Date,
    Money,
    Percent,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Norp => "NORP",
            EntityLabel::Date => "DATE",
            EntityLabel::Money => "MONEY",
            EntityLabel::Percent => "PERCENT",
        }
    }
}

/// Trait for pluggable NER backends.
///
/// Backends are shared read-only across the whole session, hence
/// `Send + Sync`.
pub trait NerBackend: Send + Sync {
    /// Human-readable backend identifier (e.g. "gazetteer", "blank").
    fn backend_id(&self) -> &str;

    /// Whether this is the degraded stand-in. Callers skip extraction
    /// entirely for degraded backends.
    fn is_degraded(&self) -> bool {
        false
    }

    /// Extract entities in order of appearance.
    fn extract(&self, text: &str) -> Result<Vec<Entity>, NerError>;
}

/// The entity backend chosen for a session, plus the warning to surface
/// when the full backend could not be loaded.
pub struct LoadedNer {
    pub backend: Arc<dyn NerBackend>,
    pub warning: Option<String>,
}

impl LoadedNer {
    pub fn is_degraded(&self) -> bool {
        self.backend.is_degraded()
    }
}

/// Resolve the session's entity backend.
///
/// With `enabled` unset the blank backend is used silently. Otherwise the
/// gazetteer at `gazetteer_path` (or the built-in one) is loaded; any failure
/// substitutes the blank backend and returns a warning instead of an error.
pub fn load_ner_backend(enabled: bool, gazetteer_path: Option<&Path>) -> LoadedNer {
    if !enabled {
        info!("Entity extraction disabled by configuration");
        return LoadedNer {
            backend: Arc::new(BlankNerBackend::new()),
            warning: None,
        };
    }

    let gazetteer = match gazetteer_path {
        Some(path) => Gazetteer::from_path(path),
        None => Gazetteer::builtin(),
    };

    match gazetteer.and_then(NewsNerBackend::new) {
        Ok(backend) => {
            info!("Loaded entity gazetteer '{}'", backend.name());
            LoadedNer {
                backend: Arc::new(backend),
                warning: None,
            }
        }
        Err(e) => {
            let warning = format!(
                "Falling back to blank entity model ({}). Entities will be empty for this run.",
                e
            );
            warn!("{}", warning);
            LoadedNer {
                backend: Arc::new(BlankNerBackend::new()),
                warning: Some(warning),
            }
        }
    }
}
