//! Annotated result export.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AnnotatedRow, Entity};

use super::TableError;

/// Default artifact name for exported results.
pub const RESULTS_FILENAME: &str = "news_headlines_nlp_results.csv";

pub const SENTIMENT_COLUMN: &str = "Sentiment";
pub const ENTITIES_COLUMN: &str = "Entities";

/// How the `Entities` column is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitiesFormat {
    /// `[('Apple', 'ORG'), ('Tim Cook', 'PERSON')]`
    #[default]
    Python,
    /// `[["Apple","ORG"],["Tim Cook","PERSON"]]`
    Json,
}

impl EntitiesFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "python" | "repr" => Some(Self::Python),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn format(&self, entities: &[Entity]) -> String {
        match self {
            EntitiesFormat::Python => {
                let pairs: Vec<String> = entities
                    .iter()
                    .map(|e| format!("({}, {})", python_repr(&e.text), python_repr(&e.label)))
                    .collect();
                format!("[{}]", pairs.join(", "))
            }
            EntitiesFormat::Json => {
                let pairs: Vec<(&str, &str)> = entities
                    .iter()
                    .map(|e| (e.text.as_str(), e.label.as_str()))
                    .collect();
                serde_json::to_string(&pairs).unwrap_or_default()
            }
        }
    }
}

/// Options controlling the exported table layout.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub delimiter: u8,
    pub entities_format: EntitiesFormat,
    /// Write only the text column plus the appended columns.
    pub selected_only: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            entities_format: EntitiesFormat::default(),
            selected_only: false,
        }
    }
}

/// Shortest round-trip decimal form, always with a fractional part (`0.0`, `-0.35`).
pub fn format_sentiment(value: f64) -> String {
    format!("{:?}", value)
}

/// Quote a string the way a Python `repr` would.
fn python_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Write annotated rows as delimited text.
///
/// With `selected_only` unset the output carries every source column. An
/// existing `Sentiment` or `Entities` column is overwritten in place;
/// otherwise the two columns are appended.
pub fn write_results<W: Write>(
    writer: W,
    headers: &[String],
    column: usize,
    rows: &[AnnotatedRow],
    options: &WriteOptions,
) -> Result<(), TableError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    let layout = Layout::new(headers, column, options.selected_only);
    csv_writer
        .write_record(&layout.headers)
        .map_err(|e| TableError::Write(e.to_string()))?;

    for row in rows {
        let record = layout.record(row, options.entities_format);
        csv_writer
            .write_record(&record)
            .map_err(|e| TableError::Write(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TableError::Write(e.to_string()))?;
    Ok(())
}

/// Render results into an in-memory UTF-8 buffer.
pub fn render_results(
    headers: &[String],
    column: usize,
    rows: &[AnnotatedRow],
    options: &WriteOptions,
) -> Result<Vec<u8>, TableError> {
    let mut buffer = Vec::new();
    write_results(&mut buffer, headers, column, rows, options)?;
    Ok(buffer)
}

/// Render results fully, then write them to `path` in one step so a failed
/// render never leaves a partial file behind.
pub fn write_results_to_path(
    path: &Path,
    headers: &[String],
    column: usize,
    rows: &[AnnotatedRow],
    options: &WriteOptions,
) -> Result<(), TableError> {
    let buffer = render_results(headers, column, rows, options)?;
    std::fs::write(path, &buffer)?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Column layout of the exported table.
struct Layout {
    headers: Vec<String>,
    sentiment_pos: usize,
    entities_pos: usize,
    selected_only: bool,
}

impl Layout {
    fn new(source_headers: &[String], column: usize, selected_only: bool) -> Self {
        if selected_only {
            let name = source_headers.get(column).cloned().unwrap_or_default();
            return Self {
                headers: vec![name, SENTIMENT_COLUMN.to_string(), ENTITIES_COLUMN.to_string()],
                sentiment_pos: 1,
                entities_pos: 2,
                selected_only,
            };
        }

        let mut headers = source_headers.to_vec();
        let sentiment_pos = position_or_append(&mut headers, SENTIMENT_COLUMN);
        let entities_pos = position_or_append(&mut headers, ENTITIES_COLUMN);
        Self {
            headers,
            sentiment_pos,
            entities_pos,
            selected_only,
        }
    }

    fn record(&self, row: &AnnotatedRow, format: EntitiesFormat) -> Vec<String> {
        let mut record: Vec<String> = if self.selected_only {
            vec![row.text().to_string(), String::new(), String::new()]
        } else {
            let mut fields: Vec<String> = row
                .row()
                .record
                .iter()
                .map(|f| f.clone().unwrap_or_default())
                .collect();
            fields.resize(self.headers.len(), String::new());
            fields
        };

        record[self.sentiment_pos] = format_sentiment(row.sentiment());
        record[self.entities_pos] = format.format(row.entities());
        record
    }
}

fn position_or_append(headers: &mut Vec<String>, name: &str) -> usize {
    match headers.iter().position(|h| h == name) {
        Some(pos) => pos,
        None => {
            headers.push(name.to_string());
            headers.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;

    fn annotated(record: &[&str], text: &str, sentiment: f64, entities: Vec<Entity>) -> AnnotatedRow {
        let row = Row {
            source_index: 0,
            text: text.to_string(),
            record: record.iter().map(|f| Some(f.to_string())).collect(),
        };
        AnnotatedRow::new(row, sentiment, entities)
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_python_entities_format() {
        let entities = vec![
            Entity::new("Apple", "ORG"),
            Entity::new("Tim Cook", "PERSON"),
        ];
        assert_eq!(
            EntitiesFormat::Python.format(&entities),
            "[('Apple', 'ORG'), ('Tim Cook', 'PERSON')]"
        );
        assert_eq!(EntitiesFormat::Python.format(&[]), "[]");
    }

    #[test]
    fn test_python_repr_switches_quotes() {
        let entities = vec![Entity::new("McDonald's", "ORG")];
        assert_eq!(
            EntitiesFormat::Python.format(&entities),
            "[(\"McDonald's\", 'ORG')]"
        );
    }

    #[test]
    fn test_json_entities_format() {
        let entities = vec![Entity::new("NASA", "ORG")];
        assert_eq!(EntitiesFormat::Json.format(&entities), r#"[["NASA","ORG"]]"#);
    }

    #[test]
    fn test_entities_format_parse() {
        assert_eq!(EntitiesFormat::parse("JSON"), Some(EntitiesFormat::Json));
        assert_eq!(EntitiesFormat::parse("python"), Some(EntitiesFormat::Python));
        assert_eq!(EntitiesFormat::parse("xml"), None);
    }

    #[test]
    fn test_format_sentiment() {
        assert_eq!(format_sentiment(0.0), "0.0");
        assert_eq!(format_sentiment(0.5), "0.5");
        assert_eq!(format_sentiment(-0.35), "-0.35");
    }

    #[test]
    fn test_write_all_columns_appends_results() {
        let rows = vec![annotated(
            &["1", "Apple soars"],
            "Apple soars",
            0.5,
            vec![Entity::new("Apple", "ORG")],
        )];

        let output = render_results(
            &headers(&["id", "headline"]),
            1,
            &rows,
            &WriteOptions::default(),
        )
        .unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(
            text,
            "id,headline,Sentiment,Entities\n1,Apple soars,0.5,\"[('Apple', 'ORG')]\"\n"
        );
    }

    #[test]
    fn test_write_selected_only() {
        let rows = vec![annotated(&["7", "Oil slides"], "Oil slides", -0.2, vec![])];
        let options = WriteOptions {
            selected_only: true,
            ..WriteOptions::default()
        };

        let output = render_results(&headers(&["id", "title"]), 1, &rows, &options).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(text, "title,Sentiment,Entities\nOil slides,-0.2,[]\n");
    }

    #[test]
    fn test_existing_sentiment_column_is_overwritten() {
        let rows = vec![annotated(&["Fed holds", "old"], "Fed holds", 0.0, vec![])];

        let output = render_results(
            &headers(&["title", "Sentiment"]),
            0,
            &rows,
            &WriteOptions::default(),
        )
        .unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(text, "title,Sentiment,Entities\nFed holds,0.0,[]\n");
    }

    #[test]
    fn test_missing_fields_written_empty() {
        let row = Row {
            source_index: 0,
            text: "Quiet day".to_string(),
            record: vec![Some("Quiet day".to_string()), None],
        };
        let rows = vec![AnnotatedRow::new(row, 0.0, vec![])];

        let output = render_results(
            &headers(&["title", "author"]),
            0,
            &rows,
            &WriteOptions::default(),
        )
        .unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(text, "title,author,Sentiment,Entities\nQuiet day,,0.0,[]\n");
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RESULTS_FILENAME);
        let rows = vec![annotated(&["Rain"], "Rain", 0.0, vec![])];

        write_results_to_path(&path, &headers(&["title"]), 0, &rows, &WriteOptions::default())
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("title,Sentiment,Entities\n"));
    }
}
