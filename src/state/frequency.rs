/// Word frequency listings
///
/// The backend stores one listing per scope as newline-delimited
/// `token_PART: count` lines, most frequent first.

use std::fmt;

use super::filter::PosFilter;

/// Identity of a frequency entry within a listing: the word as parsed and its POS tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordKey {
    pub word: String,
    pub part: String,
}

impl WordKey {
    pub fn new(word: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            part: part.into(),
        }
    }

    /// Term sent to the heatmap and line plot endpoints
    pub fn visualization_term(&self) -> String {
        format!("{}_{}", self.word.to_lowercase(), self.part)
    }

    pub fn part_name(&self) -> &str {
        PosFilter::name_for_tag(&self.part)
    }

    /// Word as rendered; proper nouns get a leading capital
    pub fn display_word(&self) -> String {
        if self.part == "PROPN" {
            capitalize(&self.word)
        } else {
            self.word.clone()
        }
    }
}

impl fmt::Display for WordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_word(), self.part_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    /// 1-based position in the backend listing
    pub rank: usize,
    pub key: WordKey,
    pub count: u64,
}

impl FrequencyEntry {
    pub fn label(&self) -> String {
        format!("{}: {}", self.key.display_word(), format_count(self.count))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse one `token_PART: count` line; the token may itself contain underscores
pub fn parse_line(line: &str) -> Option<(WordKey, u64)> {
    let (word, rest) = line.rsplit_once('_')?;
    let part = rest.split(':').next()?.trim();
    let count = line.split(": ").nth(1)?.trim().parse().ok()?;
    if part.is_empty() {
        return None;
    }
    Some((WordKey::new(word, part), count))
}

/// Parse a whole listing, skipping blank and malformed lines
pub fn parse_listing(text: &str) -> Vec<FrequencyEntry> {
    let mut entries = Vec::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        match parse_line(line) {
            Some((key, count)) => entries.push(FrequencyEntry {
                rank: entries.len() + 1,
                key,
                count,
            }),
            None => tracing::trace!(line, "skipping malformed frequency line"),
        }
    }
    entries
}

/// Group digits in threes: `1234567` → `1,234,567`
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_line() {
        let (key, count) = parse_line("run_VERB: 1234").unwrap();
        assert_eq!(key, WordKey::new("run", "VERB"));
        assert_eq!(count, 1234);
    }

    #[test]
    fn test_parse_keeps_inner_underscores() {
        let (key, count) = parse_line("new_york_PROPN: 7").unwrap();
        assert_eq!(key.word, "new_york");
        assert_eq!(key.part, "PROPN");
        assert_eq!(count, 7);
    }

    #[test]
    fn test_listing_skips_blank_and_malformed() {
        let entries = parse_listing("the_DET: 900\n\nnonsense\nbob_PROPN: 12\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].rank, 2);
        assert_eq!(entries[1].key.word, "bob");
    }

    #[test]
    fn test_proper_noun_capitalized_in_label_only() {
        let entries = parse_listing("bob_PROPN: 1200");
        assert_eq!(entries[0].label(), "Bob: 1,200");
        assert_eq!(entries[0].key.to_string(), "Bob (Proper Noun)");
        assert_eq!(entries[0].key.word, "bob");
        assert_eq!(entries[0].key.visualization_term(), "bob_PROPN");
    }

    #[test]
    fn test_label_and_term() {
        let entries = parse_listing("run_VERB: 1234");
        assert_eq!(entries[0].label(), "run: 1,234");
        assert_eq!(WordKey::new("Bob", "PROPN").visualization_term(), "bob_PROPN");
        assert_eq!(WordKey::new("Bob", "PROPN").to_string(), "Bob (Proper Noun)");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
