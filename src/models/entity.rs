//! Named entity spans.

use serde::{Deserialize, Serialize};

/// A tagged span of source text, e.g. `("Tim Cook", "PERSON")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text exactly as it appears in the row.
    pub text: String,
    /// Category tag (`PERSON`, `ORG`, `GPE`, ...). Vocabulary is defined by the backend.
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}
