//! Ad-hoc text scoring command.

use console::style;

use headline_analyzer::config::Settings;
use headline_analyzer::table::{format_sentiment, is_missing};

use super::build_annotator;

/// Annotate each text and print its polarity and entities.
///
/// Missing texts are skipped with a notice, the same as rows dropped from a table.
pub fn cmd_score(settings: &Settings, texts: &[String], json: bool) -> anyhow::Result<()> {
    let annotator = build_annotator(settings)?;

    let present = present_texts(texts, settings.default_na_values);
    let skipped = texts.len() - present.len();
    if skipped > 0 {
        eprintln!(
            "{} Skipped {} missing or empty text(s)",
            style("!").yellow(),
            skipped
        );
    }

    let mut results = Vec::with_capacity(present.len());
    for text in present {
        results.push(annotator.annotate_text(text)?);
    }

    if json {
        let output: Vec<serde_json::Value> = results
            .iter()
            .map(|row| {
                serde_json::json!({
                    "text": row.text(),
                    "sentiment": row.sentiment(),
                    "entities": row.entities(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for row in &results {
        let sentiment = format_sentiment(row.sentiment());
        let sentiment = if row.sentiment() > 0.0 {
            style(sentiment).green()
        } else if row.sentiment() < 0.0 {
            style(sentiment).red()
        } else {
            style(sentiment).dim()
        };
        println!("{} {}", sentiment, row.text());
        for entity in row.entities() {
            println!("    {} {}", style(&entity.label).cyan(), entity.text);
        }
    }
    Ok(())
}

fn present_texts(texts: &[String], default_na_values: bool) -> Vec<&str> {
    texts
        .iter()
        .map(String::as_str)
        .filter(|text| !is_missing(text, default_na_values))
        .collect()
}
