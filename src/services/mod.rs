//! Service layer for headline analysis.
//!
//! This module contains domain logic separated from UI concerns.
//! Services can be used by the CLI or embedded in other front ends.

pub mod annotation;
pub mod ner;
pub mod pipeline;
pub mod sentiment;

pub use annotation::{AnnotationEvent, BatchAnnotator, BatchSummary};
pub use pipeline::{AnalysisOutcome, AnalysisPipeline, AnalysisReport, PipelineOptions};
