//! Search-input classification.
//!
//! Free text is mapped to one [`QueryIntent`] by walking [`QUERY_RULES`] in
//! order; the first rule whose predicate matches decides the outcome, even if
//! it then fails to build an intent.

use std::sync::LazyLock;

use regex::Regex;

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)in\s+([a-zA-Z\s]+)$").expect("valid location regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    /// Outlets with the latest closing time.
    LatestClosing,
    /// Count and list outlets whose location matches `location`.
    CountByLocation { location: String },
    /// Full-text search for the raw query.
    FreeText { query: String },
}

/// One classification rule: a predicate over the lowercased input and a
/// builder over the original (trimmed) input.
pub struct QueryRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub build: fn(&str) -> Option<QueryIntent>,
}

impl std::fmt::Debug for QueryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRule").field("name", &self.name).finish()
    }
}

/// Classification rules in precedence order.
pub const QUERY_RULES: &[QueryRule] = &[
    QueryRule {
        name: "latest_closing",
        matches: mentions_latest_closing,
        build: build_latest_closing,
    },
    QueryRule {
        name: "count_by_location",
        matches: mentions_location_count,
        build: build_count_by_location,
    },
    QueryRule {
        name: "free_text",
        matches: always,
        build: build_free_text,
    },
];

fn mentions_latest_closing(lower: &str) -> bool {
    lower.contains("latest closing") || lower.contains("close late")
}

fn mentions_location_count(lower: &str) -> bool {
    lower.contains("how many") || lower.contains("outlets in")
}

fn always(_: &str) -> bool {
    true
}

fn build_latest_closing(_: &str) -> Option<QueryIntent> {
    Some(QueryIntent::LatestClosing)
}

fn build_count_by_location(query: &str) -> Option<QueryIntent> {
    extract_location(query).map(|location| QueryIntent::CountByLocation { location })
}

fn build_free_text(query: &str) -> Option<QueryIntent> {
    Some(QueryIntent::FreeText {
        query: query.to_string(),
    })
}

/// The rule that decides `input`, or `None` for blank input.
#[must_use]
pub fn winning_rule(input: &str) -> Option<&'static QueryRule> {
    let lower = input.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    QUERY_RULES.iter().find(|rule| (rule.matches)(&lower))
}

/// Classify a search input.
///
/// Returns `None` for blank input, and when the winning rule cannot build an
/// intent (a location query with nothing after "in"). There is no fallback to
/// a lower-precedence rule in that case.
#[must_use]
pub fn classify(input: &str) -> Option<QueryIntent> {
    let rule = winning_rule(input)?;
    (rule.build)(input.trim())
}

/// Pull the trailing `in <name>` location out of a query.
#[must_use]
pub fn extract_location(query: &str) -> Option<String> {
    let caps = LOCATION_RE.captures(query)?;
    let location = caps.get(1)?.as_str().trim();
    if location.is_empty() {
        None
    } else {
        Some(location.to_string())
    }
}
