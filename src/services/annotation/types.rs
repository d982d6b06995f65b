//! Types shared by the batch annotator and its callers.

use thiserror::Error;

use crate::services::sentiment::SentimentError;

/// Events emitted while a batch is annotated.
/// Used by the CLI to drive progress bars and status messages.
#[derive(Debug, Clone)]
pub enum AnnotationEvent {
    Started {
        total_rows: usize,
    },
    RowCompleted {
        index: usize,
        entities: usize,
    },
    /// Entity extraction failed for a row; it was recorded with no entities.
    RowDegraded {
        index: usize,
        error: String,
    },
    Complete {
        summary: BatchSummary,
    },
}

/// Counters for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub entities: usize,
    pub extraction_failures: usize,
    /// The degraded entity backend was active; every row has empty entities.
    pub degraded: bool,
}

/// Errors that abort a batch. Entity extraction failures never appear here.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Sentiment scoring failed for row {index}: {source}")]
    Sentiment {
        index: usize,
        #[source]
        source: SentimentError,
    },

    #[error("Sentiment scorer returned non-finite polarity {value} for row {index}")]
    InvalidPolarity { index: usize, value: f64 },
}
