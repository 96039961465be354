/// Free-text search over the frequency listing
///
/// Space-separated terms are OR'ed. A bare term is a case-insensitive
/// substring match; a quoted term (`"cat"`) must equal the whole word.

use std::sync::OnceLock;

use regex::Regex;

use super::filter::PosFilter;
use super::frequency::{FrequencyEntry, WordKey};

fn exact_term() -> &'static Regex {
    static EXACT: OnceLock<Regex> = OnceLock::new();
    EXACT.get_or_init(|| Regex::new(r#""(\w+)""#).expect("exact term pattern is valid"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    substrings: Vec<String>,
    exact: Vec<String>,
}

impl SearchQuery {
    pub fn parse(term: &str) -> Self {
        let mut query = SearchQuery::default();
        for token in term.split(' ').filter(|token| !token.is_empty()) {
            match exact_term().captures(token) {
                Some(captures) => query.exact.push(captures[1].to_lowercase()),
                None => query.substrings.push(token.to_lowercase()),
            }
        }
        query
    }

    pub fn hits(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.substrings.iter().any(|term| word.contains(term.as_str()))
            || self.exact.iter().any(|term| *term == word)
    }
}

/// Indices of visible entries plus the search hits the filter suppressed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    pub visible: Vec<usize>,
    pub hidden_by_filter: Vec<WordKey>,
}

/// Apply filter and (optional) search to a listing
pub fn compute_visibility(
    entries: &[FrequencyEntry],
    filter: PosFilter,
    query: Option<&SearchQuery>,
) -> Visibility {
    let mut visibility = Visibility::default();
    for (index, entry) in entries.iter().enumerate() {
        let passes_filter = filter.matches(&entry.key.part);
        match query {
            None if passes_filter => visibility.visible.push(index),
            None => {}
            Some(query) if query.hits(&entry.key.word) => {
                if passes_filter {
                    visibility.visible.push(index);
                } else {
                    visibility.hidden_by_filter.push(entry.key.clone());
                }
            }
            Some(_) => {}
        }
    }
    visibility
}

/// Remembered query and the "hidden by filter" notice
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Text currently in the search box
    pub input: String,
    remembered: String,
    notice_dismissed: bool,
}

impl SearchState {
    /// Run a search.
    ///
    /// `Some("")` clears the remembered query, `None` re-applies it.
    /// Returns the query to filter with, if any.
    pub fn apply(&mut self, term: Option<&str>) -> Option<SearchQuery> {
        self.notice_dismissed = false;
        if let Some(term) = term {
            self.remembered = term.trim().to_string();
        }
        self.query()
    }

    pub fn query(&self) -> Option<SearchQuery> {
        if self.remembered.is_empty() {
            None
        } else {
            Some(SearchQuery::parse(&self.remembered))
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice_dismissed = true;
    }

    /// The notice for a visibility pass, unless dismissed or empty
    pub fn notice(&self, visibility: &Visibility) -> Option<HiddenNotice> {
        if self.notice_dismissed || visibility.hidden_by_filter.is_empty() {
            return None;
        }
        Some(HiddenNotice::new(&visibility.hidden_by_filter))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenNotice {
    pub message: String,
    pub tooltip: String,
}

impl HiddenNotice {
    pub fn new(hidden: &[WordKey]) -> Self {
        let count = hidden.len();
        Self {
            message: format!(
                "{} result{} hidden by filter",
                count,
                if count == 1 { "" } else { "s" }
            ),
            tooltip: hidden
                .iter()
                .map(|key| key.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
