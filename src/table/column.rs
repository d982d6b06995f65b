//! Headline column selection.

use super::TableError;

/// Substrings that mark a header as holding headline text.
const HEADLINE_MARKERS: [&str; 2] = ["title", "headline"];

/// Outcome of choosing the column to annotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    /// First header whose name looks like a headline column.
    Detected { index: usize, name: String },
    /// Column named explicitly by the operator.
    Explicit { index: usize, name: String },
    /// Nothing matched; annotation waits for an explicit choice.
    Deferred,
}

impl ColumnSelection {
    /// Resolved `(index, name)`, or `None` while deferred.
    pub fn column(&self) -> Option<(usize, &str)> {
        match self {
            ColumnSelection::Detected { index, name } | ColumnSelection::Explicit { index, name } => {
                Some((*index, name.as_str()))
            }
            ColumnSelection::Deferred => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.column().map(|(_, name)| name)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, ColumnSelection::Deferred)
    }
}

/// Pick the first header (in declared order) containing "title" or
/// "headline", case-insensitively.
pub fn select_column<S: AsRef<str>>(headers: &[S]) -> ColumnSelection {
    headers
        .iter()
        .enumerate()
        .find(|(_, header)| {
            let lower = header.as_ref().to_lowercase();
            HEADLINE_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .map(|(index, header)| ColumnSelection::Detected {
            index,
            name: header.as_ref().to_string(),
        })
        .unwrap_or(ColumnSelection::Deferred)
}

/// Apply an explicit column choice, falling back to detection when there is none.
///
/// An exact header match wins over a case-insensitive one. Naming a column
/// that does not exist is an error rather than a silent fallback.
pub fn resolve_column<S: AsRef<str>>(
    headers: &[S],
    explicit: Option<&str>,
) -> Result<ColumnSelection, TableError> {
    let Some(wanted) = explicit else {
        return Ok(select_column(headers));
    };

    let index = headers
        .iter()
        .position(|h| h.as_ref() == wanted)
        .or_else(|| {
            headers
                .iter()
                .position(|h| h.as_ref().eq_ignore_ascii_case(wanted))
        });

    match index {
        Some(index) => Ok(ColumnSelection::Explicit {
            index,
            name: headers[index].as_ref().to_string(),
        }),
        None => Err(TableError::UnknownColumn {
            name: wanted.to_string(),
            available: headers
                .iter()
                .map(|h| h.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_title_column() {
        let selection = select_column(&["id", "Title", "body"]);
        assert_eq!(
            selection,
            ColumnSelection::Detected {
                index: 1,
                name: "Title".to_string()
            }
        );
    }

    #[test]
    fn test_detects_headline_substring() {
        let selection = select_column(&["date", "news_HEADLINE_text"]);
        assert_eq!(selection.name(), Some("news_HEADLINE_text"));
    }

    #[test]
    fn test_first_match_in_declared_order_wins() {
        let selection = select_column(&["id", "headline", "title"]);
        assert_eq!(selection.column(), Some((1, "headline")));
    }

    #[test]
    fn test_no_match_defers() {
        let selection = select_column(&["id", "text"]);
        assert!(selection.is_deferred());
        assert_eq!(selection.column(), None);
    }

    #[test]
    fn test_empty_headers_defer() {
        let headers: [&str; 0] = [];
        assert!(select_column(&headers).is_deferred());
    }

    #[test]
    fn test_explicit_choice_resolves_deferred_table() {
        let selection = resolve_column(&["id", "text"], Some("text")).unwrap();
        assert_eq!(
            selection,
            ColumnSelection::Explicit {
                index: 1,
                name: "text".to_string()
            }
        );
    }

    #[test]
    fn test_explicit_choice_overrides_detection() {
        let selection = resolve_column(&["title", "summary"], Some("summary")).unwrap();
        assert_eq!(selection.column(), Some((1, "summary")));
    }

    #[test]
    fn test_explicit_choice_is_case_insensitive_fallback() {
        let selection = resolve_column(&["id", "Text"], Some("text")).unwrap();
        assert_eq!(selection.name(), Some("Text"));
    }

    #[test]
    fn test_unknown_explicit_column_is_error() {
        let result = resolve_column(&["id", "text"], Some("headline"));
        match result {
            Err(TableError::UnknownColumn { name, available }) => {
                assert_eq!(name, "headline");
                assert_eq!(available, "id, text");
            }
            other => panic!("expected UnknownColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_no_explicit_choice_uses_detection() {
        let selection = resolve_column(&["id", "text"], None).unwrap();
        assert!(selection.is_deferred());
    }
}
