//! Batch annotator: sentiment plus entities for every row.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{AnnotatedRow, Row};
use crate::services::ner::NerBackend;
use crate::services::sentiment::SentimentScorer;

use super::types::{AnnotationError, AnnotationEvent, BatchSummary};

/// Annotates rows with an injected scorer and entity backend.
///
/// The backend is chosen once per session (see `load_ner_backend`); when it
/// is the degraded one, extraction is skipped and every row gets no entities.
pub struct BatchAnnotator {
    scorer: Arc<dyn SentimentScorer>,
    ner: Arc<dyn NerBackend>,
}

impl BatchAnnotator {
    pub fn new(scorer: Arc<dyn SentimentScorer>, ner: Arc<dyn NerBackend>) -> Self {
        Self { scorer, ner }
    }

    /// Whether the active entity backend is the degraded stand-in.
    pub fn is_degraded(&self) -> bool {
        self.ner.is_degraded()
    }

    pub fn scorer_id(&self) -> &str {
        self.scorer.scorer_id()
    }

    pub fn backend_id(&self) -> &str {
        self.ner.backend_id()
    }

    /// Annotate every row, preserving length and order.
    pub fn annotate(&self, rows: &[Row]) -> Result<Vec<AnnotatedRow>, AnnotationError> {
        self.annotate_with_progress(rows, |_| {})
            .map(|(annotated, _)| annotated)
    }

    /// Annotate every row, reporting progress to `on_event`.
    ///
    /// A sentiment failure aborts the batch. An extraction failure is logged,
    /// reported as `RowDegraded`, and the row keeps an empty entity list.
    pub fn annotate_with_progress<F>(
        &self,
        rows: &[Row],
        mut on_event: F,
    ) -> Result<(Vec<AnnotatedRow>, BatchSummary), AnnotationError>
    where
        F: FnMut(AnnotationEvent),
    {
        let degraded = self.is_degraded();
        debug!(
            "Annotating {} rows (scorer={}, ner={})",
            rows.len(),
            self.scorer_id(),
            self.backend_id()
        );
        on_event(AnnotationEvent::Started {
            total_rows: rows.len(),
        });

        let mut summary = BatchSummary {
            degraded,
            ..Default::default()
        };
        let mut annotated = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let sentiment = self.polarity(index, &row.text)?;

            let entities = if degraded {
                Vec::new()
            } else {
                match self.ner.extract(&row.text) {
                    Ok(entities) => entities,
                    Err(e) => {
                        warn!("Entity extraction failed for row {}: {}", index, e);
                        summary.extraction_failures += 1;
                        on_event(AnnotationEvent::RowDegraded {
                            index,
                            error: e.to_string(),
                        });
                        Vec::new()
                    }
                }
            };

            summary.entities += entities.len();
            on_event(AnnotationEvent::RowCompleted {
                index,
                entities: entities.len(),
            });
            annotated.push(AnnotatedRow::new(row.clone(), sentiment, entities));
        }

        summary.rows = annotated.len();
        on_event(AnnotationEvent::Complete { summary });
        Ok((annotated, summary))
    }

    /// Annotate a single ad-hoc text.
    pub fn annotate_text(&self, text: &str) -> Result<AnnotatedRow, AnnotationError> {
        let mut annotated = self.annotate(&[Row::from_text(0, text)])?;
        Ok(annotated.remove(0))
    }

    fn polarity(&self, index: usize, text: &str) -> Result<f64, AnnotationError> {
        let value = self
            .scorer
            .polarity(text)
            .map_err(|source| AnnotationError::Sentiment { index, source })?;
        if !value.is_finite() {
            return Err(AnnotationError::InvalidPolarity { index, value });
        }
        Ok(value.clamp(-1.0, 1.0))
    }
}

/// Entities in `rows` grouped by label, most frequent label first.
pub fn label_counts(rows: &[AnnotatedRow]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for entity in rows.iter().flat_map(|r| r.entities().iter()) {
        match counts.iter_mut().find(|(label, _)| *label == entity.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((entity.label.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

impl std::fmt::Debug for BatchAnnotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchAnnotator")
            .field("scorer", &self.scorer_id())
            .field("ner", &self.backend_id())
            .finish()
    }
}
