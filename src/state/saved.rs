/// Bookmarked navigation targets
use chrono::{DateTime, Utc};

use super::data::{Scope, ShowInfo};
use super::navigation::{episode_title, season_title};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPage {
    /// Row id in the library
    pub id: i64,
    pub scope: Scope,
    pub saved_at: DateTime<Utc>,
}

impl SavedPage {
    /// Titles of each level, space separated
    pub fn label(&self, info: &ShowInfo) -> String {
        let mut parts = Vec::new();
        if let Some(show) = self.scope.show_id() {
            parts.push(info.show_title(show).to_string());
        }
        if let Some(season) = self.scope.season_id() {
            parts.push(season_title(season));
        }
        if let Some(episode) = self.scope.episode_id() {
            parts.push(episode_title(episode));
        }
        parts.join(" ")
    }

    /// Tooltip text for the saved page entry
    pub fn saved_label(&self) -> String {
        format!("Saved {}", self.saved_at.format("%Y-%m-%d %H:%M UTC"))
    }

    /// Blue for shows, green for seasons, red for episodes
    pub fn color(&self) -> (u8, u8, u8) {
        match self.scope.path().len() {
            1 => (0, 0, 255),
            2 => (0, 128, 0),
            _ => (255, 0, 0),
        }
    }
}
