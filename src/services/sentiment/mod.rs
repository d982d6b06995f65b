//! Sentiment polarity scoring.
//!
//! `SentimentScorer` is the capability the batch annotator consumes. The
//! built-in `LexiconScorer` averages word polarities from a lexicon, with
//! intensifier and negation handling.

mod lexicon;

use std::path::PathBuf;

use thiserror::Error;

pub use lexicon::{LexiconOverrides, LexiconScorer};

/// Errors from sentiment scorers and lexicon loading.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("Failed to read lexicon {path}: {source}")]
    LexiconIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse lexicon: {0}")]
    LexiconParse(String),

    #[error("Polarity {value} for '{word}' is outside -1.0..=1.0")]
    InvalidPolarity { word: String, value: f64 },

    #[error("Scoring failed: {0}")]
    Scoring(String),
}

/// A pure function from text to polarity in `[-1.0, 1.0]`.
pub trait SentimentScorer: Send + Sync {
    /// Short identifier for logs (e.g. "lexicon").
    fn scorer_id(&self) -> &str;

    /// Score a single text.
    fn polarity(&self, text: &str) -> Result<f64, SentimentError>;
}
