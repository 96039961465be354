/// The frequency listing shown for the current scope
///
/// Each scope change bumps a generation counter; a listing that arrives
/// for an older generation is dropped.

use super::data::Scope;
use super::frequency::{parse_listing, FrequencyEntry};
use super::marked::MarkedWords;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    /// Nothing to show (overview)
    #[default]
    Idle,
    Requesting,
    Ready,
}

#[derive(Debug, Default)]
pub struct AnalysisPanel {
    status: AnalysisStatus,
    generation: u64,
    entries: Vec<FrequencyEntry>,
}

impl AnalysisPanel {
    /// Start showing `scope`. Returns the generation to tag the request with,
    /// or `None` when there is nothing to request.
    pub fn begin(&mut self, scope: &Scope, marked: &mut MarkedWords) -> Option<u64> {
        self.generation += 1;
        self.entries.clear();
        if *scope == Scope::Overview {
            self.status = AnalysisStatus::Idle;
            marked.clear_counts(true);
            None
        } else {
            self.status = AnalysisStatus::Requesting;
            Some(self.generation)
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Install a listing. Returns false if it belongs to an older scope.
    pub fn accept(&mut self, generation: u64, text: &str, marked: &mut MarkedWords) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.entries = parse_listing(text);
        marked.refresh_counts(&self.entries);
        self.status = AnalysisStatus::Ready;
        true
    }

    /// Entries to render; quick mode keeps only the first `limit`
    pub fn rows(&self, quick_mode: bool, limit: usize) -> &[FrequencyEntry] {
        if quick_mode {
            &self.entries[..self.entries.len().min(limit)]
        } else {
            &self.entries
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self.status {
            AnalysisStatus::Idle => Some("Select a show, season, or episode to view analysis."),
            AnalysisStatus::Requesting => Some("Requesting Data..."),
            AnalysisStatus::Ready => None,
        }
    }
}
