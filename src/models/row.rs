//! Input rows and their annotated counterparts.

use super::Entity;

/// One input record that survived pre-filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Zero-based position of the record in the source table (header excluded).
    pub source_index: usize,
    /// Value of the selected text column. Never empty.
    pub text: String,
    /// Every field of the source record in header order; `None` marks a missing value.
    pub record: Vec<Option<String>>,
}

impl Row {
    /// Build a standalone row that has no surrounding table.
    pub fn from_text(source_index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            source_index,
            record: vec![Some(text.clone())],
            text,
        }
    }
}

/// A row with its sentiment polarity and extracted entities.
///
/// Only the batch annotator creates these; there are no mutators.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRow {
    row: Row,
    sentiment: f64,
    entities: Vec<Entity>,
}

impl AnnotatedRow {
    pub(crate) fn new(row: Row, sentiment: f64, entities: Vec<Entity>) -> Self {
        Self {
            row,
            sentiment,
            entities,
        }
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn text(&self) -> &str {
        &self.row.text
    }

    /// Polarity in `[-1.0, 1.0]`.
    pub fn sentiment(&self) -> f64 {
        self.sentiment
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}
