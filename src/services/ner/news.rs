//! Full entity tagger for news headlines.
//!
//! Candidates come from four sources: gazetteer phrases, fixed patterns
//! (money, percentages, dates), titled names ("Senator Jane Doe") and
//! organization suffixes ("Acme Holdings"). A capitalized-pair heuristic
//! fills the remaining gaps in sentence-case text. Overlapping candidates are
//! resolved longest-first, so every character belongs to at most one entity.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::Entity;

use super::{EntityLabel, Gazetteer, NerBackend, NerError};

/// One word of a person's name: an initial or a capitalized word, with an
/// optional hyphenated or apostrophe part ("O'Brien", "Ocasio-Cortez").
const NAME_WORD: &str = r"(?:\p{Lu}\.|\p{Lu}\p{L}*(?:[-'’]\p{Lu}\p{L}+)?)";

/// One word in front of an organization suffix.
const ORG_WORD: &str = r"\p{Lu}[\p{L}\p{N}&'’.-]*";

const PRIORITY_GAZETTEER: u8 = 0;
const PRIORITY_PATTERN: u8 = 1;
const PRIORITY_ORG_SUFFIX: u8 = 2;
const PRIORITY_NAME_HEURISTIC: u8 = 3;

static CAPITALIZED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]{2,}(?:\s+[A-Z]\.?\s+|\s+)[A-Z][a-z]{2,})\b")
        .expect("capitalized name pattern should compile")
});

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("word pattern should compile"));

struct PatternRule {
    regex: Regex,
    label: EntityLabel,
    /// Capture group holding the entity text.
    group: usize,
}

fn rule(pattern: &str, label: EntityLabel, group: usize) -> PatternRule {
    PatternRule {
        regex: Regex::new(pattern).expect("entity pattern should compile"),
        label,
        group,
    }
}

static PATTERN_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        // $5 billion, €3.2bn, £120
        rule(
            r"[$€£¥]\d+(?:,\d{3})*(?:\.\d+)?(?:\s?(?i:trillion|billion|million|bn|mn|m|k)\b)?",
            EntityLabel::Money,
            0,
        ),
        // 40 million dollars
        rule(
            r"\b\d+(?:,\d{3})*(?:\.\d+)?(?:\s(?i:trillion|billion|million))?\s(?i:dollars|euros|pounds|yen|yuan)\b",
            EntityLabel::Money,
            0,
        ),
        rule(
            r"\b\d+(?:\.\d+)?(?:\s?%|\s(?i:percent|per cent)\b)",
            EntityLabel::Percent,
            0,
        ),
        // "May" alone is too often a verb; require a day.
        rule(
            r"\b(?:January|February|March|April|June|July|August|September|October|November|December)(?:\s+\d{1,2}(?:st|nd|rd|th)?)?(?:,?\s+\d{4})?\b",
            EntityLabel::Date,
            0,
        ),
        rule(
            r"\bMay\s+\d{1,2}(?:st|nd|rd|th)?(?:,?\s+\d{4})?\b",
            EntityLabel::Date,
            0,
        ),
        rule(
            r"\b(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b",
            EntityLabel::Date,
            0,
        ),
        rule(
            r"(?i)\b(?:today|yesterday|tomorrow|(?:this|last|next)\s+(?:week|weekend|month|year))\b",
            EntityLabel::Date,
            0,
        ),
        rule(
            r"\b(?i:in|since|by|from|until|of|during|before|after)\s+((?:1[89]|20)\d{2})\b",
            EntityLabel::Date,
            1,
        ),
        rule(r"\b((?:1[89]|20)\d0s)\b", EntityLabel::Date, 1),
    ]
});

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    label: EntityLabel,
    priority: u8,
}

/// Entity tagger backed by a [`Gazetteer`].
pub struct NewsNerBackend {
    name: String,
    phrases: Vec<(Regex, EntityLabel)>,
    titled_person: Option<Regex>,
    org_suffix: Option<Regex>,
    stopwords: HashSet<String>,
    title_words: HashSet<String>,
}

impl NewsNerBackend {
    /// Compile a gazetteer into a tagger. Empty gazetteers are rejected.
    pub fn new(gazetteer: Gazetteer) -> Result<Self, NerError> {
        if gazetteer.is_empty() {
            return Err(NerError::EmptyGazetteer(gazetteer.name));
        }

        let mut phrases = Vec::new();
        for (entries, label) in [
            (&gazetteer.organizations, EntityLabel::Org),
            (&gazetteer.places, EntityLabel::Gpe),
            (&gazetteer.nationalities, EntityLabel::Norp),
            (&gazetteer.people, EntityLabel::Person),
        ] {
            if let Some(alternatives) = alternation(entries) {
                phrases.push((Regex::new(&format!("(?:{})", alternatives))?, label));
            }
        }

        let titled_person = alternation(&gazetteer.person_titles)
            .map(|titles| {
                Regex::new(&format!(
                    r"(?:{titles})\s+({w}(?:\s+{w}){{0,2}})",
                    titles = titles,
                    w = NAME_WORD
                ))
            })
            .transpose()?;

        let org_suffix = alternation(&gazetteer.org_suffixes)
            .map(|suffixes| {
                Regex::new(&format!(
                    r"\b((?:{w}\s+){{1,3}})({suffixes})",
                    w = ORG_WORD,
                    suffixes = suffixes
                ))
            })
            .transpose()?;

        let title_words = gazetteer
            .person_titles
            .iter()
            .flat_map(|t| t.split_whitespace())
            .map(str::to_string)
            .collect();

        Ok(Self {
            name: gazetteer.name,
            phrases,
            titled_person,
            org_suffix,
            stopwords: gazetteer.name_stopwords.into_iter().collect(),
            title_words,
        })
    }

    /// Tagger over the built-in English news gazetteer.
    pub fn builtin() -> Result<Self, NerError> {
        Self::new(Gazetteer::builtin()?)
    }

    /// Name of the gazetteer this tagger was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn titled_persons(&self, regex: &Regex, text: &str, title_case: bool, out: &mut Vec<Span>) {
        // Capitalized words after a title in a title-cased headline are
        // usually the rest of the headline, not the name.
        let limit = if title_case { 1 } else { 3 };

        for caps in regex.captures_iter(text) {
            let Some(name) = caps.get(1) else { continue };
            let kept: Vec<_> = WORD
                .find_iter(name.as_str())
                .take_while(|w| !self.stopwords.contains(w.as_str()))
                .take(limit)
                .collect();
            let Some(last) = kept.last() else { continue };

            out.push(Span {
                start: name.start(),
                end: name.start() + last.end(),
                label: EntityLabel::Person,
                priority: PRIORITY_PATTERN,
            });
        }
    }

    fn suffixed_orgs(&self, regex: &Regex, text: &str, title_case: bool, out: &mut Vec<Span>) {
        for caps in regex.captures_iter(text) {
            let (Some(prefix), Some(suffix)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let words: Vec<_> = WORD.find_iter(prefix.as_str()).collect();
            let Some(mut first) = words
                .iter()
                .position(|w| !self.stopwords.contains(w.as_str()))
            else {
                continue;
            };
            if title_case {
                first = first.max(words.len() - 1);
                if self.stopwords.contains(words[first].as_str()) {
                    continue;
                }
            }

            out.push(Span {
                start: prefix.start() + words[first].start(),
                end: suffix.end(),
                label: EntityLabel::Org,
                priority: PRIORITY_ORG_SUFFIX,
            });
        }
    }

    fn capitalized_names(&self, text: &str, out: &mut Vec<Span>) {
        for caps in CAPITALIZED_NAME.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            let rejected = m.as_str().split_whitespace().any(|w| {
                self.stopwords.contains(w) || self.title_words.contains(w)
            });
            if rejected {
                continue;
            }
            out.push(Span {
                start: m.start(),
                end: m.end(),
                label: EntityLabel::Person,
                priority: PRIORITY_NAME_HEURISTIC,
            });
        }
    }
}

impl NerBackend for NewsNerBackend {
    fn backend_id(&self) -> &str {
        "gazetteer"
    }

    fn extract(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let title_case = is_title_case(text);
        let mut candidates = Vec::new();

        for (regex, label) in &self.phrases {
            for m in regex.find_iter(text) {
                candidates.push(Span {
                    start: m.start(),
                    end: m.end(),
                    label: *label,
                    priority: PRIORITY_GAZETTEER,
                });
            }
        }

        for rule in PATTERN_RULES.iter() {
            for caps in rule.regex.captures_iter(text) {
                if let Some(m) = caps.get(rule.group) {
                    candidates.push(Span {
                        start: m.start(),
                        end: m.end(),
                        label: rule.label,
                        priority: PRIORITY_PATTERN,
                    });
                }
            }
        }

        if let Some(regex) = &self.titled_person {
            self.titled_persons(regex, text, title_case, &mut candidates);
        }
        if let Some(regex) = &self.org_suffix {
            self.suffixed_orgs(regex, text, title_case, &mut candidates);
        }
        if !title_case {
            self.capitalized_names(text, &mut candidates);
        }

        Ok(resolve_overlaps(candidates)
            .into_iter()
            .map(|span| Entity::new(&text[span.start..span.end], span.label.as_str()))
            .collect())
    }
}

/// Regex alternation over non-empty entries, longest first so the longest
/// phrase wins at any position.
fn alternation(entries: &[String]) -> Option<String> {
    let mut entries: Vec<&str> = entries
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();
    if entries.is_empty() {
        return None;
    }
    entries.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    entries.dedup();

    Some(
        entries
            .iter()
            .map(|e| bounded(e))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

/// Escape a phrase, adding word boundaries only on alphanumeric edges
/// ("U.S." must still match before a hyphen or space).
fn bounded(phrase: &str) -> String {
    let word_edge = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
    let lead = if word_edge(phrase.chars().next()) { r"\b" } else { "" };
    let trail = if word_edge(phrase.chars().next_back()) { r"\b" } else { "" };
    format!("{}{}{}", lead, regex::escape(phrase), trail)
}

/// Headline-style capitalization: every alphabetic word longer than three
/// characters starts uppercase, and there are at least two of them.
fn is_title_case(text: &str) -> bool {
    let mut significant = 0;
    for word in text.split_whitespace() {
        let Some(first) = word.chars().next() else { continue };
        if !first.is_alphabetic() || word.chars().count() <= 3 {
            continue;
        }
        if !first.is_uppercase() {
            return false;
        }
        significant += 1;
    }
    significant >= 2
}

/// Keep non-overlapping spans, longest first with ties broken by priority.
/// Heuristic names only fill what remains. Output is in text order.
fn resolve_overlaps(mut candidates: Vec<Span>) -> Vec<Span> {
    candidates.sort_by_key(|s| {
        (
            s.priority == PRIORITY_NAME_HEURISTIC,
            Reverse(s.end - s.start),
            s.priority,
            s.start,
        )
    });

    let mut accepted: Vec<Span> = Vec::new();
    for span in candidates {
        if span.start >= span.end {
            continue;
        }
        let free = accepted
            .iter()
            .all(|a| span.end <= a.start || span.start >= a.end);
        if free {
            accepted.push(span);
        }
    }

    accepted.sort_by_key(|s| s.start);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<(String, String)> {
        NewsNerBackend::builtin()
            .unwrap()
            .extract(text)
            .unwrap()
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    fn pair(text: &str, label: &str) -> (String, String) {
        (text.to_string(), label.to_string())
    }

    #[test]
    fn test_extract_organizations() {
        assert_eq!(
            extract("NASA and SpaceX delay launch again"),
            vec![pair("NASA", "ORG"), pair("SpaceX", "ORG")]
        );
    }

    #[test]
    fn test_extract_titled_persons() {
        assert_eq!(
            extract("Senator Jane Doe questions Fed Chair Powell"),
            vec![
                pair("Jane Doe", "PERSON"),
                pair("Fed", "ORG"),
                pair("Powell", "PERSON"),
            ]
        );
    }

    #[test]
    fn test_extract_locations() {
        assert_eq!(
            extract("Wildfires spread across California and Oregon"),
            vec![pair("California", "GPE"), pair("Oregon", "GPE")]
        );
    }

    #[test]
    fn test_extract_money_and_percent() {
        assert_eq!(
            extract("Tesla shares drop 12% after $2 billion recall"),
            vec![
                pair("Tesla", "ORG"),
                pair("12%", "PERCENT"),
                pair("$2 billion", "MONEY"),
            ]
        );
    }

    #[test]
    fn test_extract_dates() {
        assert_eq!(
            extract("Markets rally on Monday as inflation cools in 2024"),
            vec![pair("Monday", "DATE"), pair("2024", "DATE")]
        );
    }

    #[test]
    fn test_longest_phrase_wins() {
        assert_eq!(
            extract("Bank of America beats estimates"),
            vec![pair("Bank of America", "ORG")]
        );
        assert_eq!(
            extract("New York Times reports on New York"),
            vec![pair("New York Times", "ORG"), pair("New York", "GPE")]
        );
    }

    #[test]
    fn test_title_case_headline_skips_name_heuristic() {
        assert_eq!(
            extract("Apple Unveils New Watch In California"),
            vec![pair("Apple", "ORG"), pair("California", "GPE")]
        );
        assert_eq!(
            extract("President Biden Signs Climate Bill"),
            vec![pair("Biden", "PERSON")]
        );
    }

    #[test]
    fn test_capitalized_name_heuristic() {
        assert_eq!(
            extract("Police search for John Smith in Ohio"),
            vec![pair("John Smith", "PERSON"), pair("Ohio", "GPE")]
        );
    }

    #[test]
    fn test_org_suffix() {
        assert_eq!(
            extract("Shares of Acme Holdings surge"),
            vec![pair("Acme Holdings", "ORG")]
        );
        assert_eq!(
            extract("The Acme Group said profits fell"),
            vec![pair("Acme Group", "ORG")]
        );
    }

    #[test]
    fn test_repeated_mentions_are_kept() {
        assert_eq!(
            extract("Trump meets Trump supporters"),
            vec![pair("Trump", "PERSON"), pair("Trump", "PERSON")]
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(extract("").is_empty());
        assert!(extract("   ").is_empty());
        assert!(extract("nothing to see here").is_empty());
    }

    #[test]
    fn test_empty_gazetteer_rejected() {
        let result = NewsNerBackend::new(Gazetteer {
            name: "empty".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(NerError::EmptyGazetteer(name)) if name == "empty"));
    }

    #[test]
    fn test_custom_gazetteer() {
        let backend = NewsNerBackend::new(Gazetteer {
            name: "sports".to_string(),
            organizations: vec!["Lakers".to_string(), "Los Angeles Lakers".to_string()],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(backend.name(), "sports");
        assert_eq!(backend.backend_id(), "gazetteer");
        let entities = backend.extract("Los Angeles Lakers sign guard").unwrap();
        assert_eq!(entities, vec![Entity::new("Los Angeles Lakers", "ORG")]);
    }

    #[test]
    fn test_title_case_detection() {
        assert!(is_title_case("Stocks Slide As Oil Prices Climb"));
        assert!(!is_title_case("Stocks slide as oil prices climb"));
        assert!(!is_title_case("NASA"));
    }

    #[test]
    fn test_bounded_phrases() {
        assert_eq!(bounded("NASA"), r"\bNASA\b");
        assert_eq!(bounded("U.S."), r"\bU\.S\.");
    }
}
