//! Headline table analysis command.

use std::path::Path;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use headline_analyzer::config::Settings;
use headline_analyzer::services::annotation::label_counts;
use headline_analyzer::services::{
    AnalysisOutcome, AnalysisPipeline, AnalysisReport, AnnotationEvent,
};
use headline_analyzer::table::{
    format_sentiment, ColumnSelection, EntitiesFormat, ENTITIES_COLUMN, SENTIMENT_COLUMN,
};

use super::build_annotator;
use crate::cli::helpers::{is_interactive, print_columns, prompt_for_column, truncate};

/// Annotate a headline table and write the results.
pub fn cmd_analyze(settings: &Settings, file: &Path) -> anyhow::Result<()> {
    let annotator = build_annotator(settings)?;
    let pipeline = AnalysisPipeline::new(annotator, settings.pipeline_options());

    let table = pipeline
        .read(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    println!(
        "{} Loaded {} rows from {}",
        style("✓").green(),
        table.len(),
        file.display()
    );

    let mut selection = pipeline.select(&table, settings.column.as_deref())?;
    if selection.is_deferred() {
        if !is_interactive() {
            print_columns(table.headers());
            return Ok(());
        }
        match prompt_for_column(table.headers())? {
            Some(index) => {
                selection = ColumnSelection::Explicit {
                    index,
                    name: table.headers()[index].clone(),
                };
            }
            None => {
                println!("{} Cancelled", style("!").yellow());
                return Ok(());
            }
        }
    }

    match &selection {
        ColumnSelection::Detected { name, .. } => {
            println!("{} Detected headline column '{}'", style("→").cyan(), name)
        }
        ColumnSelection::Explicit { name, .. } => {
            println!("{} Using column '{}'", style("→").cyan(), name)
        }
        ColumnSelection::Deferred => {}
    }

    let mut progress: Option<ProgressBar> = None;
    let outcome = pipeline.annotate_table(&table, &selection, |event| match event {
        AnnotationEvent::Started { total_rows } => {
            let pb = ProgressBar::new(total_rows as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                    .expect("progress template should parse")
                    .progress_chars("█▓░"),
            );
            pb.set_message("Annotating...");
            progress = Some(pb);
        }
        AnnotationEvent::RowCompleted { .. } => {
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }
        AnnotationEvent::RowDegraded { index, error } => {
            if let Some(ref pb) = progress {
                pb.println(format!(
                    "{} Row {}: entity extraction failed ({})",
                    style("!").yellow(),
                    index + 1,
                    error
                ));
            }
        }
        AnnotationEvent::Complete { .. } => {
            if let Some(pb) = progress.take() {
                pb.finish_and_clear();
            }
        }
    });

    // Drop an unfinished bar if annotation aborted.
    if let Some(pb) = progress.take() {
        pb.abandon();
    }

    let report = match outcome.context("Annotation failed")? {
        AnalysisOutcome::Completed(report) => report,
        AnalysisOutcome::ColumnRequired { headers } => {
            print_columns(&headers);
            return Ok(());
        }
    };

    pipeline
        .write(&report, &settings.output_path)
        .with_context(|| format!("Failed to write {}", settings.output_path.display()))?;

    if settings.preview_rows > 0 {
        print_preview(&report, settings.preview_rows, settings.entities_format);
    }
    print_summary(&report, &settings.output_path);

    Ok(())
}

fn print_preview(report: &AnalysisReport, rows: usize, format: EntitiesFormat) {
    println!();
    println!(
        "{}",
        style(format!(
            "{:<60}  {:>9}  {}",
            truncate(&report.column_name, 60),
            SENTIMENT_COLUMN,
            ENTITIES_COLUMN
        ))
        .bold()
    );
    for row in report.rows.iter().take(rows) {
        println!(
            "{:<60}  {:>9}  {}",
            truncate(row.text(), 60),
            format_sentiment(row.sentiment()),
            truncate(&format.format(row.entities()), 80)
        );
    }
    if report.rows.len() > rows {
        println!(
            "{}",
            style(format!("... {} more rows", report.rows.len() - rows)).dim()
        );
    }
    println!();
}

fn print_summary(report: &AnalysisReport, output: &Path) {
    let summary = &report.summary;
    println!(
        "{} Annotated {} rows ({} dropped with no text)",
        style("✓").green(),
        summary.rows,
        report.dropped
    );

    if summary.degraded {
        println!(
            "  {} Entity extraction unavailable: all entity lists are empty",
            style("!").yellow()
        );
    } else {
        let labels: Vec<String> = label_counts(&report.rows)
            .into_iter()
            .map(|(label, count)| format!("{} {}", count, label))
            .collect();
        if labels.is_empty() {
            println!("  Entities: none found");
        } else {
            println!("  Entities: {} ({})", summary.entities, labels.join(", "));
        }
        if summary.extraction_failures > 0 {
            println!(
                "  {} {} rows had extraction errors",
                style("!").yellow(),
                summary.extraction_failures
            );
        }
    }

    println!("  Results: {}", style(output.display()).cyan());
}
