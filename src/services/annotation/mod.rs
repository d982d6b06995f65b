//! Batch annotation of headline rows.
//!
//! `BatchAnnotator` pairs every row with a sentiment polarity and its named
//! entities, reporting progress through `AnnotationEvent`s.

mod annotator;
mod types;

pub use annotator::{label_counts, BatchAnnotator};
pub use types::{AnnotationError, AnnotationEvent, BatchSummary};
