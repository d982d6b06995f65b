//! Lexicon-based polarity scoring.
//!
//! Each known word carries a polarity in `[-1.0, 1.0]`. A text's score is
//! the mean polarity of the words found, after applying any preceding
//! intensifier ("very good") and negation ("not good"). Text with no known
//! words scores `0.0`.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{SentimentError, SentimentScorer};

/// Negation flips and dampens the next polar word within this many tokens.
const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]+(?:['\u{2019}][A-Za-z]+)*").expect("token pattern should compile")
});

static BASE_POLARITY: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("best", 1.0),
    ("better", 0.5),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("perfect", 1.0),
    ("incredible", 0.9),
    ("impressive", 1.0),
    ("remarkable", 0.75),
    ("brilliant", 0.9),
    ("beautiful", 0.85),
    ("nice", 0.6),
    ("positive", 0.23),
    ("happy", 0.8),
    ("glad", 0.5),
    ("proud", 0.8),
    ("thrilled", 0.6),
    ("excited", 0.4),
    ("exciting", 0.3),
    ("welcome", 0.8),
    ("love", 0.5),
    ("loved", 0.7),
    ("popular", 0.6),
    ("favorite", 0.5),
    ("strong", 0.43),
    ("stronger", 0.45),
    ("strongest", 0.5),
    ("win", 0.8),
    ("wins", 0.8),
    ("won", 0.6),
    ("winning", 0.5),
    ("victory", 0.6),
    ("triumph", 0.7),
    ("success", 0.6),
    ("successful", 0.75),
    ("rally", 0.5),
    ("rallies", 0.5),
    ("surge", 0.5),
    ("surges", 0.5),
    ("soar", 0.6),
    ("soars", 0.6),
    ("soaring", 0.6),
    ("boom", 0.5),
    ("booming", 0.6),
    ("boost", 0.4),
    ("boosts", 0.4),
    ("gain", 0.4),
    ("gains", 0.4),
    ("rise", 0.3),
    ("rises", 0.3),
    ("rising", 0.3),
    ("jump", 0.4),
    ("jumps", 0.4),
    ("climb", 0.3),
    ("climbs", 0.3),
    ("recover", 0.4),
    ("recovers", 0.4),
    ("recovery", 0.4),
    ("rebound", 0.4),
    ("rebounds", 0.4),
    ("growth", 0.4),
    ("grow", 0.3),
    ("grows", 0.3),
    ("profit", 0.4),
    ("profits", 0.4),
    ("bullish", 0.6),
    ("upbeat", 0.5),
    ("hope", 0.4),
    ("hopes", 0.4),
    ("hopeful", 0.5),
    ("optimism", 0.5),
    ("optimistic", 0.5),
    ("breakthrough", 0.6),
    ("celebrate", 0.6),
    ("celebrates", 0.6),
    ("praise", 0.6),
    ("praised", 0.6),
    ("hero", 0.6),
    ("heroes", 0.6),
    ("rescue", 0.4),
    ("rescued", 0.4),
    ("saves", 0.4),
    ("safe", 0.5),
    ("secure", 0.4),
    ("peace", 0.5),
    ("peaceful", 0.6),
    ("calm", 0.3),
    ("relief", 0.4),
    ("agreement", 0.3),
    ("deal", 0.2),
    ("approve", 0.4),
    ("approves", 0.4),
    ("approved", 0.4),
    ("support", 0.3),
    ("innovative", 0.5),
    ("easy", 0.43),
    ("fun", 0.3),
    ("free", 0.4),
    ("fresh", 0.3),
    ("new", 0.14),
    ("huge", 0.4),
    ("top", 0.5),
    ("high", 0.16),
    ("healthy", 0.5),
    ("rich", 0.375),
    ("wealthy", 0.3),
    ("lucky", 0.5),
    ("smart", 0.21),
    ("bright", 0.7),
    ("clean", 0.37),
    ("fair", 0.7),
    ("honest", 0.6),
    ("kind", 0.6),
    ("friendly", 0.375),
    // negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("evil", -1.0),
    ("cruel", -1.0),
    ("poor", -0.4),
    ("sad", -0.5),
    ("angry", -0.5),
    ("furious", -0.7),
    ("outrage", -0.6),
    ("hate", -0.8),
    ("hates", -0.8),
    ("ugly", -0.7),
    ("stupid", -0.8),
    ("wrong", -0.5),
    ("weak", -0.375),
    ("weaker", -0.4),
    ("negative", -0.3),
    ("fear", -0.6),
    ("fears", -0.6),
    ("afraid", -0.6),
    ("scared", -0.5),
    ("worry", -0.4),
    ("worries", -0.4),
    ("worried", -0.4),
    ("concern", -0.3),
    ("concerns", -0.3),
    ("warning", -0.4),
    ("warns", -0.4),
    ("threat", -0.5),
    ("threatens", -0.5),
    ("danger", -0.6),
    ("dangerous", -0.6),
    ("deadly", -0.8),
    ("fatal", -0.7),
    ("crisis", -0.6),
    ("chaos", -0.7),
    ("turmoil", -0.6),
    ("disaster", -0.8),
    ("disastrous", -0.8),
    ("catastrophe", -0.9),
    ("catastrophic", -0.9),
    ("tragic", -0.75),
    ("tragedy", -0.75),
    ("shock", -0.5),
    ("shocking", -0.6),
    ("bleak", -0.5),
    ("grim", -0.5),
    ("gloomy", -0.5),
    ("crash", -0.6),
    ("crashes", -0.6),
    ("collapse", -0.7),
    ("collapses", -0.7),
    ("plunge", -0.6),
    ("plunges", -0.6),
    ("plummet", -0.7),
    ("plummets", -0.7),
    ("slump", -0.5),
    ("slumps", -0.5),
    ("tumble", -0.5),
    ("tumbles", -0.5),
    ("sink", -0.4),
    ("sinks", -0.4),
    ("fall", -0.3),
    ("falls", -0.3),
    ("fell", -0.3),
    ("drop", -0.3),
    ("drops", -0.3),
    ("decline", -0.3),
    ("declines", -0.3),
    ("slide", -0.3),
    ("slides", -0.3),
    ("slow", -0.3),
    ("bearish", -0.6),
    ("volatile", -0.3),
    ("uncertain", -0.2),
    ("uncertainty", -0.3),
    ("recession", -0.6),
    ("inflation", -0.2),
    ("unemployment", -0.3),
    ("layoffs", -0.5),
    ("cuts", -0.2),
    ("debt", -0.3),
    ("bankrupt", -0.7),
    ("bankruptcy", -0.7),
    ("loss", -0.4),
    ("losses", -0.4),
    ("lose", -0.4),
    ("loses", -0.4),
    ("lost", -0.4),
    ("fail", -0.5),
    ("fails", -0.5),
    ("failed", -0.5),
    ("failure", -0.6),
    ("kill", -0.8),
    ("kills", -0.8),
    ("killed", -0.8),
    ("dead", -0.2),
    ("death", -0.6),
    ("deaths", -0.6),
    ("die", -0.6),
    ("dies", -0.6),
    ("war", -0.6),
    ("attack", -0.5),
    ("attacks", -0.5),
    ("violence", -0.7),
    ("violent", -0.8),
    ("injured", -0.5),
    ("hurt", -0.5),
    ("sick", -0.7),
    ("ill", -0.5),
    ("scandal", -0.6),
    ("fraud", -0.7),
    ("corrupt", -0.6),
    ("corruption", -0.6),
    ("crime", -0.5),
    ("criminal", -0.5),
    ("guilty", -0.5),
    ("arrest", -0.3),
    ("arrested", -0.3),
    ("ban", -0.3),
    ("bans", -0.3),
    ("protest", -0.2),
    ("protests", -0.2),
    ("flood", -0.3),
    ("floods", -0.3),
    ("storm", -0.2),
    ("wildfire", -0.4),
    ("earthquake", -0.5),
    ("pandemic", -0.4),
    ("outbreak", -0.4),
];

static BASE_INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("highly", 1.3),
    ("deeply", 1.4),
    ("hugely", 1.4),
    ("super", 1.4),
    ("too", 1.2),
    ("so", 1.2),
    ("quite", 1.1),
    ("fairly", 0.9),
    ("somewhat", 0.7),
    ("slightly", 0.5),
];

static BASE_NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "cannot", "none", "nobody", "nothing",
    "hardly", "barely",
];

/// Operator-supplied additions merged over the built-in lexicon.
///
/// ```toml
/// negations = ["nary"]
///
/// [words]
/// bullish = 0.8
///
/// [intensifiers]
/// massively = 1.5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconOverrides {
    #[serde(default)]
    pub words: HashMap<String, f64>,
    #[serde(default)]
    pub intensifiers: HashMap<String, f64>,
    #[serde(default)]
    pub negations: Vec<String>,
}

impl LexiconOverrides {
    /// Load overrides from TOML, YAML, or JSON (by extension, TOML by default).
    pub fn from_path(path: &Path) -> Result<Self, SentimentError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| SentimentError::LexiconIo {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        match ext {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| SentimentError::LexiconParse(e.to_string())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| SentimentError::LexiconParse(e.to_string())),
            _ => toml::from_str(&contents).map_err(|e| SentimentError::LexiconParse(e.to_string())),
        }
    }
}

/// Word-polarity lexicon scorer.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl LexiconScorer {
    /// Scorer backed by the built-in English news lexicon.
    pub fn new() -> Self {
        Self {
            words: BASE_POLARITY
                .iter()
                .map(|(w, p)| (w.to_string(), *p))
                .collect(),
            intensifiers: BASE_INTENSIFIERS
                .iter()
                .map(|(w, m)| (w.to_string(), *m))
                .collect(),
            negations: BASE_NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Built-in lexicon with overrides from a file.
    pub fn from_path(path: &Path) -> Result<Self, SentimentError> {
        let overrides = LexiconOverrides::from_path(path)?;
        Self::new().with_overrides(overrides)
    }

    /// Merge overrides; entries replace built-in ones with the same word.
    pub fn with_overrides(mut self, overrides: LexiconOverrides) -> Result<Self, SentimentError> {
        for (word, value) in overrides.words {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(SentimentError::InvalidPolarity { word, value });
            }
            self.words.insert(word.to_lowercase(), value);
        }
        for (word, multiplier) in overrides.intensifiers {
            self.intensifiers.insert(word.to_lowercase(), multiplier);
        }
        for word in overrides.negations {
            self.negations.insert(word.to_lowercase());
        }
        Ok(self)
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token) || token.ends_with("n't")
    }

    /// Mean adjusted polarity of the known words in `text`.
    pub fn score(&self, text: &str) -> f64 {
        let mut assessments: Vec<f64> = Vec::new();
        let mut intensity: Option<f64> = None;
        let mut since_negation: Option<usize> = None;

        for token in tokenize(text) {
            if self.is_negation(&token) {
                since_negation = Some(0);
                intensity = None;
                continue;
            }

            if let Some(multiplier) = self.intensifiers.get(&token) {
                intensity = Some(intensity.unwrap_or(1.0) * multiplier);
                continue;
            }

            if let Some(&base) = self.words.get(&token) {
                let mut value = base * intensity.unwrap_or(1.0);
                if since_negation.is_some() {
                    value *= NEGATION_FACTOR;
                }
                assessments.push(value.clamp(-1.0, 1.0));
                intensity = None;
                since_negation = None;
                continue;
            }

            intensity = None;
            since_negation = since_negation
                .map(|n| n + 1)
                .filter(|n| *n < NEGATION_WINDOW);
        }

        if assessments.is_empty() {
            return 0.0;
        }

        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        // Fold -0.0 into 0.0 so exports never print a signed zero.
        if mean == 0.0 {
            0.0
        } else {
            mean.clamp(-1.0, 1.0)
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn scorer_id(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        Ok(self.score(text))
    }
}

/// Lowercased word tokens; curly apostrophes are normalized.
fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().replace('\u{2019}', "'").to_lowercase())
        .collect()
}
