//! Summary parser: turns free-text summaries into entity and relationship
//! declarations.
//!
//! A summary is scanned line by line. Section headers switch the scanner
//! between entity and relationship mode:
//!
//! ```text
//! ### Entities:
//! 1. **Alice**
//! 2. Bob
//!
//! ### Relationships:
//! Alice -> mentors [strength: 0.8] -> Bob
//! ```
//!
//! [`SummaryParser`] is the incremental state machine; [`parse_summary`] is
//! the one-shot pure wrapper.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::DEFAULT_EDGE_WEIGHT;

const ENTITY_HEADERS: [&str; 3] = ["### Entities:", "**Entities:**", "Entities:"];
const RELATIONSHIP_HEADERS: [&str; 3] =
    ["### Relationships:", "**Relationships:**", "Relationships:"];

const ARROW: &str = "->";

fn strength_regex() -> &'static Regex {
    static STRENGTH: OnceLock<Regex> = OnceLock::new();
    STRENGTH.get_or_init(|| {
        Regex::new(r"\[strength:\s*(\d\.\d)\]").expect("valid strength pattern")
    })
}

fn non_word_regex() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"\W+").expect("valid non-word pattern"))
}

// ── Declarations ───────────────────────────────────────────────────

/// A relationship line, endpoints normalized and label sanitized.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipDecl {
    pub source: String,
    pub relationship: String,
    pub target: String,
    pub weight: f64,
}

/// One data line recognized by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Entity(String),
    Relationship(RelationshipDecl),
}

/// Everything declared by one summary, in line order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSummary {
    pub entities: Vec<String>,
    pub relationships: Vec<RelationshipDecl>,
}

// ── Normalization ──────────────────────────────────────────────────

/// Trim and lowercase an entity name.
pub fn normalize_entity_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Trim, lowercase, and collapse every run of non-word characters into `_`.
pub fn sanitize_relationship_name(name: &str) -> String {
    non_word_regex()
        .replace_all(&name.trim().to_lowercase(), "_")
        .into_owned()
}

// ── Line parsers ───────────────────────────────────────────────────

/// Parse a line from an entity section. Returns `None` for blank lines.
///
/// Enumerated items (`"1. Foo"`) keep only the text after the first period;
/// `**` emphasis is removed before normalizing.
pub fn parse_entity_line(line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }
    let enumerated = line.starts_with(char::is_numeric) && line.contains('.');
    let raw = match line.split_once('.') {
        Some((_, rest)) if enumerated => rest.trim(),
        _ => line.trim(),
    };
    Some(normalize_entity_name(&raw.replace("**", "")))
}

/// Parse a line from a relationship section.
///
/// The first and last arrow-separated segments are the endpoints; the second
/// segment carries the label and an optional `[strength: D.D]` annotation.
/// Lines without an arrow yield `None`.
pub fn parse_relationship_line(line: &str) -> Option<RelationshipDecl> {
    if line.trim().is_empty() {
        return None;
    }
    let parts: Vec<&str> = line.split(ARROW).collect();
    if parts.len() < 2 {
        return None;
    }

    let source = normalize_entity_name(parts[0]);
    let target = normalize_entity_name(parts[parts.len() - 1]);

    let middle = parts[1].trim();
    let label = middle.split('[').next().unwrap_or_default();
    let relationship = sanitize_relationship_name(label);

    let weight = strength_regex()
        .captures(middle)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(DEFAULT_EDGE_WEIGHT);

    Some(RelationshipDecl {
        source,
        relationship,
        target,
        weight,
    })
}

// ── State machine ──────────────────────────────────────────────────

/// Which section of a summary the scanner is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    None,
    Entities,
    Relationships,
}

/// Incremental line-fed parser. The current section survives across calls,
/// so one instance can span several summaries.
#[derive(Debug, Default)]
pub struct SummaryParser {
    section: Section,
}

impl SummaryParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Consume one line. Header lines switch sections and yield nothing.
    pub fn feed_line(&mut self, line: &str) -> Option<ParsedLine> {
        if ENTITY_HEADERS.iter().any(|h| line.starts_with(h)) {
            self.section = Section::Entities;
            return None;
        }
        if RELATIONSHIP_HEADERS.iter().any(|h| line.starts_with(h)) {
            self.section = Section::Relationships;
            return None;
        }

        match self.section {
            Section::None => None,
            Section::Entities => parse_entity_line(line).map(ParsedLine::Entity),
            Section::Relationships => {
                parse_relationship_line(line).map(ParsedLine::Relationship)
            }
        }
    }
}

/// Parse a whole summary, starting outside any section.
pub fn parse_summary(text: &str) -> ParsedSummary {
    let mut parser = SummaryParser::new();
    let mut parsed = ParsedSummary::default();
    for line in text.lines() {
        match parser.feed_line(line) {
            Some(ParsedLine::Entity(name)) => parsed.entities.push(name),
            Some(ParsedLine::Relationship(rel)) => parsed.relationships.push(rel),
            None => {}
        }
    }
    parsed
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalization_is_idempotent(name in "[ \\tA-Za-z0-9*.]{0,40}") {
            let once = normalize_entity_name(&name);
            prop_assert_eq!(normalize_entity_name(&once), once.clone());
            prop_assert_eq!(once.trim(), once.as_str());
        }

        #[test]
        fn sanitized_labels_have_no_adjacent_separators(label in "[A-Za-z !?,.-]{0,40}") {
            let once = sanitize_relationship_name(&label);
            prop_assert!(!once.contains("__"));
            prop_assert!(once.chars().all(|c| c.is_alphanumeric() || c == '_'));
            prop_assert_eq!(sanitize_relationship_name(&once), once.clone());
        }

        #[test]
        fn entity_case_and_padding_do_not_matter(name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]") {
            let padded = format!("  **{}**  ", name.to_uppercase());
            prop_assert_eq!(parse_entity_line(&padded), parse_entity_line(&name));
        }
    }
}
