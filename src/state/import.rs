/// Importing a show from the transcript site
///
/// Only one import runs at a time and the backend may take minutes to
/// scrape a forum, so the panel just reports that work is in progress.

use super::data::Forum;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportStatus {
    #[default]
    Idle,
    Importing { title: String },
    Failed { title: String },
}

#[derive(Debug, Clone, Default)]
pub struct ImportPanel {
    /// Text in the forum search box
    pub input: String,
    filter: String,
    status: ImportStatus,
}

impl ImportPanel {
    /// Apply a title filter. Returns true when the section should expand.
    pub fn set_filter(&mut self, term: &str) -> bool {
        self.filter = term.trim().to_lowercase();
        !self.filter.is_empty()
    }

    pub fn visible_forums<'a>(&self, forums: &'a [Forum]) -> Vec<&'a Forum> {
        forums
            .iter()
            .filter(|forum| forum.title.to_lowercase().contains(&self.filter))
            .collect()
    }

    /// Returns false if an import is already running
    pub fn begin(&mut self, forum: &Forum) -> bool {
        if matches!(self.status, ImportStatus::Importing { .. }) {
            return false;
        }
        self.status = ImportStatus::Importing {
            title: forum.title.clone(),
        };
        true
    }

    pub fn succeed(&mut self) {
        self.status = ImportStatus::Idle;
    }

    pub fn fail(&mut self) {
        if let ImportStatus::Importing { title } = &self.status {
            self.status = ImportStatus::Failed {
                title: title.clone(),
            };
        }
    }

    /// The forum list is hidden once an import has been started
    pub fn shows_list(&self) -> bool {
        self.status == ImportStatus::Idle
    }

    pub fn message(&self) -> Option<String> {
        match &self.status {
            ImportStatus::Idle => None,
            ImportStatus::Importing { title } => Some(format!(
                "Currently importing {}. Check the server console for progress.",
                title
            )),
            ImportStatus::Failed { title } => Some(format!(
                "Error importing {}. Check the server console for details.",
                title
            )),
        }
    }
}
