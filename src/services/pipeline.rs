//! End-to-end analysis of a headline table.
//!
//! Read, select the text column, drop missing rows, annotate, write. Each
//! step is exposed separately so the CLI can stop after selection (to ask
//! the operator for a column) or skip writing.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::AnnotatedRow;
use crate::services::annotation::{
    AnnotationError, AnnotationEvent, BatchAnnotator, BatchSummary,
};
use crate::table::{
    drop_missing, read_table, resolve_column, write_results_to_path, ColumnSelection, ReadOptions,
    Table, TableError, WriteOptions,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}

/// Table handling options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub read: ReadOptions,
    pub write: WriteOptions,
    /// Treat `NA`, `null`, `N/A` and friends as missing.
    pub default_na_values: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            read: ReadOptions::default(),
            write: WriteOptions::default(),
            default_na_values: true,
        }
    }
}

/// Annotated rows plus what was needed to produce them.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub headers: Vec<String>,
    pub column: usize,
    pub column_name: String,
    /// Records in the source table.
    pub total_records: usize,
    /// Records removed by the missing-value filter.
    pub dropped: usize,
    pub rows: Vec<AnnotatedRow>,
    pub summary: BatchSummary,
}

/// Result of a run: annotated, or stopped because no column could be chosen.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Completed(AnalysisReport),
    ColumnRequired { headers: Vec<String> },
}

pub struct AnalysisPipeline {
    annotator: BatchAnnotator,
    options: PipelineOptions,
}

impl AnalysisPipeline {
    pub fn new(annotator: BatchAnnotator, options: PipelineOptions) -> Self {
        Self { annotator, options }
    }

    pub fn read(&self, path: &Path) -> Result<Table, PipelineError> {
        let table = read_table(path, &self.options.read)?;
        debug!(
            "Read {} records with {} columns from {}",
            table.len(),
            table.headers().len(),
            path.display()
        );
        Ok(table)
    }

    /// Choose the text column; an explicit name always wins over detection.
    pub fn select(
        &self,
        table: &Table,
        explicit: Option<&str>,
    ) -> Result<ColumnSelection, PipelineError> {
        Ok(resolve_column(table.headers(), explicit)?)
    }

    /// Filter and annotate the selected column of `table`.
    pub fn annotate_table<F>(
        &self,
        table: &Table,
        selection: &ColumnSelection,
        on_event: F,
    ) -> Result<AnalysisOutcome, PipelineError>
    where
        F: FnMut(AnnotationEvent),
    {
        let Some((column, column_name)) = selection.column() else {
            return Ok(AnalysisOutcome::ColumnRequired {
                headers: table.headers().to_vec(),
            });
        };

        let rows = drop_missing(table, column, self.options.default_na_values);
        let dropped = table.len() - rows.len();
        if dropped > 0 {
            info!(
                "Dropped {} of {} rows with no value in '{}'",
                dropped,
                table.len(),
                column_name
            );
        }

        let (annotated, summary) = self.annotator.annotate_with_progress(&rows, on_event)?;
        info!(
            "Annotated {} rows from column '{}' ({} entities)",
            summary.rows, column_name, summary.entities
        );

        Ok(AnalysisOutcome::Completed(AnalysisReport {
            headers: table.headers().to_vec(),
            column,
            column_name: column_name.to_string(),
            total_records: table.len(),
            dropped,
            rows: annotated,
            summary,
        }))
    }

    /// Write the annotated table to `path`.
    pub fn write(&self, report: &AnalysisReport, path: &Path) -> Result<(), PipelineError> {
        write_results_to_path(
            path,
            &report.headers,
            report.column,
            &report.rows,
            &self.options.write,
        )?;
        info!("Wrote {} rows to {}", report.rows.len(), path.display());
        Ok(())
    }

    /// Run every step. Nothing is written unless annotation completes.
    pub fn run<F>(
        &self,
        input: &Path,
        explicit_column: Option<&str>,
        output: &Path,
        on_event: F,
    ) -> Result<AnalysisOutcome, PipelineError>
    where
        F: FnMut(AnnotationEvent),
    {
        let table = self.read(input)?;
        let selection = self.select(&table, explicit_column)?;
        let outcome = self.annotate_table(&table, &selection, on_event)?;
        if let AnalysisOutcome::Completed(report) = &outcome {
            self.write(report, output)?;
        }
        Ok(outcome)
    }
}
