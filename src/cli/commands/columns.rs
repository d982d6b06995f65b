//! Column listing command.

use std::path::Path;

use anyhow::Context;
use console::style;

use headline_analyzer::config::Settings;
use headline_analyzer::table::{read_table, resolve_column, ColumnSelection};

/// List a table's columns and mark the one `analyze` would use.
pub fn cmd_columns(settings: &Settings, file: &Path) -> anyhow::Result<()> {
    let table = read_table(file, &settings.read_options())
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let selection = resolve_column(table.headers(), settings.column.as_deref())?;
    let selected = selection.column().map(|(index, _)| index);

    println!(
        "{} {} columns, {} rows",
        style(file.display()).bold(),
        table.headers().len(),
        table.len()
    );
    for (index, header) in table.headers().iter().enumerate() {
        if Some(index) == selected {
            let how = match selection {
                ColumnSelection::Explicit { .. } => "configured",
                _ => "detected",
            };
            println!(
                "  {:>2}) {} {}",
                index + 1,
                style(header).green(),
                style(format!("← {}", how)).dim()
            );
        } else {
            println!("  {:>2}) {}", index + 1, header);
        }
    }

    if selection.is_deferred() {
        println!(
            "{} No headline column detected; pass --column to choose one",
            style("!").yellow()
        );
    }
    Ok(())
}
