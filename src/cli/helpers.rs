//! Shared helper functions for CLI commands.

use std::io::{self, IsTerminal, Write};

use console::style;

/// Truncate a string to at most `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Whether both stdin and stdout are attached to a terminal.
pub fn is_interactive() -> bool {
    console::user_attended() && io::stdin().is_terminal()
}

/// An answer to the column prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnChoice {
    Column(usize),
    Cancel,
    Invalid,
}

/// Ask the operator which column holds the text. `None` means they declined.
///
/// Answers that name no column are reported and asked again.
pub fn prompt_for_column(headers: &[String]) -> io::Result<Option<usize>> {
    println!(
        "{} No headline column detected. Which column holds the text?",
        style("?").cyan()
    );
    for (i, header) in headers.iter().enumerate() {
        println!("  {:>2}) {}", i + 1, header);
    }

    loop {
        print!("\nColumn number or name (empty to cancel): ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        match parse_column_choice(input.trim(), headers) {
            ColumnChoice::Column(index) => return Ok(Some(index)),
            ColumnChoice::Cancel => return Ok(None),
            ColumnChoice::Invalid => println!(
                "{} '{}' is not a column; enter 1-{} or a header name",
                style("✗").red(),
                input.trim(),
                headers.len()
            ),
        }
    }
}

/// Interpret a prompt answer as a 1-based column number or a header name.
pub fn parse_column_choice(answer: &str, headers: &[String]) -> ColumnChoice {
    if answer.is_empty() {
        return ColumnChoice::Cancel;
    }
    let index = match answer.parse::<usize>() {
        Ok(n) => (1..=headers.len()).contains(&n).then(|| n - 1),
        Err(_) => headers
            .iter()
            .position(|h| h == answer)
            .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(answer))),
    };
    index.map_or(ColumnChoice::Invalid, ColumnChoice::Column)
}

/// Print the headers so a non-interactive caller can choose one.
pub fn print_columns(headers: &[String]) {
    println!("{} No headline column detected", style("!").yellow());
    println!("  Available columns:");
    for header in headers {
        println!("    - {}", header);
    }
    println!("  Re-run with --column <NAME> to choose one.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Markets rally on hopes", 10), "Markets...");
        assert_eq!(truncate("Zürich café börse", 8), "Züric...");
    }

    #[test]
    fn test_parse_column_choice() {
        let headers = vec!["id".to_string(), "Body".to_string()];
        assert_eq!(parse_column_choice("2", &headers), ColumnChoice::Column(1));
        assert_eq!(parse_column_choice("body", &headers), ColumnChoice::Column(1));
        assert_eq!(parse_column_choice("id", &headers), ColumnChoice::Column(0));
        assert_eq!(parse_column_choice("", &headers), ColumnChoice::Cancel);
    }

    #[test]
    fn test_unknown_column_choice_is_invalid_not_cancel() {
        let headers = vec!["id".to_string(), "Body".to_string()];
        assert_eq!(parse_column_choice("3", &headers), ColumnChoice::Invalid);
        assert_eq!(parse_column_choice("0", &headers), ColumnChoice::Invalid);
        assert_eq!(parse_column_choice("summary", &headers), ColumnChoice::Invalid);
    }
}
