/// Words marked for visualization
///
/// Marks are keyed on (word, part) so they survive scope changes; the
/// count shown beside each mark follows whichever listing is current.

use super::frequency::{format_count, FrequencyEntry, WordKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedWord {
    pub key: WordKey,
    /// Count in the current scope; `None` at the overview
    pub count: Option<u64>,
}

impl MarkedWord {
    pub fn label(&self) -> String {
        match self.count {
            Some(count) => format!("{}: {}", self.key, format_count(count)),
            None => self.key.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkedWords {
    words: Vec<MarkedWord>,
}

impl MarkedWords {
    /// Mark or unmark a word. Returns whether it is marked afterwards.
    pub fn toggle(&mut self, key: &WordKey, count: u64) -> bool {
        if self.unmark(key) {
            false
        } else {
            self.words.push(MarkedWord {
                key: key.clone(),
                count: Some(count),
            });
            true
        }
    }

    /// Returns false if the word was not marked
    pub fn unmark(&mut self, key: &WordKey) -> bool {
        match self.words.iter().position(|marked| marked.key == *key) {
            Some(index) => {
                self.words.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_marked(&self, key: &WordKey) -> bool {
        self.words.iter().any(|marked| marked.key == *key)
    }

    /// Drop counts at the overview, zero them when a new listing is coming
    pub fn clear_counts(&mut self, overview: bool) {
        for marked in &mut self.words {
            marked.count = if overview { None } else { Some(0) };
        }
    }

    /// Zero every count, then take counts from the full listing
    pub fn refresh_counts(&mut self, entries: &[FrequencyEntry]) {
        self.clear_counts(false);
        for marked in &mut self.words {
            if let Some(entry) = entries.iter().find(|entry| entry.key == marked.key) {
                marked.count = Some(entry.count);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkedWord> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `word_PART` terms for heatmap and line plot requests, in mark order
    pub fn visualization_terms(&self) -> Vec<String> {
        self.words
            .iter()
            .map(|marked| marked.key.visualization_term())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::frequency::parse_listing;

    #[test]
    fn test_mark_then_unmark_restores_set() {
        let mut marked = MarkedWords::default();
        let run = WordKey::new("run", "VERB");
        let walk = WordKey::new("walk", "VERB");
        marked.toggle(&run, 4);
        let before: Vec<_> = marked.iter().cloned().collect();

        assert!(marked.toggle(&walk, 2));
        assert!(!marked.toggle(&walk, 2));
        assert_eq!(marked.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_same_word_different_part_is_distinct() {
        let mut marked = MarkedWords::default();
        marked.toggle(&WordKey::new("run", "VERB"), 4);
        marked.toggle(&WordKey::new("run", "NOUN"), 1);
        assert_eq!(marked.len(), 2);
        assert!(marked.unmark(&WordKey::new("run", "NOUN")));
        assert!(!marked.unmark(&WordKey::new("run", "NOUN")));
        assert_eq!(marked.len(), 1);
    }

    #[test]
    fn test_counts_follow_new_scope() {
        let mut marked = MarkedWords::default();
        marked.toggle(&WordKey::new("run", "VERB"), 4);
        marked.toggle(&WordKey::new("gone", "NOUN"), 9);

        marked.refresh_counts(&parse_listing("walk_VERB: 8\nrun_VERB: 1500"));
        let counts: Vec<_> = marked.iter().map(|m| m.count).collect();
        assert_eq!(counts, vec![Some(1500), Some(0)]);
        assert_eq!(marked.iter().next().unwrap().label(), "run (Verb): 1,500");

        marked.clear_counts(true);
        assert!(marked.iter().all(|m| m.count.is_none()));
        assert_eq!(marked.iter().next().unwrap().label(), "run (Verb)");
    }

    #[test]
    fn test_visualization_terms_are_lowercase() {
        let mut marked = MarkedWords::default();
        marked.toggle(&WordKey::new("Bob", "PROPN"), 1);
        marked.toggle(&WordKey::new("run", "VERB"), 1);
        assert_eq!(marked.visualization_terms(), vec!["bob_PROPN", "run_VERB"]);
    }

    #[test]
    fn test_proper_noun_label_is_capitalized() {
        let mut marked = MarkedWords::default();
        marked.toggle(&WordKey::new("bob", "PROPN"), 5);
        let word = marked.iter().next().unwrap();
        assert_eq!(word.label(), "Bob (Proper Noun): 5");
        assert_eq!(word.key.word, "bob");
    }
}
