/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the backend API layer and the UI layer.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// Episode filename → stored display title (null when the backend has none)
pub type EpisodeMap = IndexMap<String, Option<String>>;
/// Season id → episodes, in the order the backend listed them
pub type SeasonMap = IndexMap<String, EpisodeMap>;
/// Show id → seasons
pub type ShowMap = IndexMap<String, SeasonMap>;
/// Show id → season id → episode filename → external topic id
pub type EpisodeIds = IndexMap<String, IndexMap<String, IndexMap<String, SourceId>>>;

/// An identifier on the external transcript site.
///
/// The backend is not consistent about encoding these as JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Number(n) => write!(f, "{}", n),
            SourceId::Text(s) => f.write_str(s),
        }
    }
}

/// Bootstrap payload of `/api/showinfo`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowInfo {
    /// Show → season → episode hierarchy
    #[serde(default)]
    pub maps: ShowMap,
    /// Human readable show titles
    #[serde(default)]
    pub titles: HashMap<String, String>,
    /// External ids used to build source links
    #[serde(default)]
    pub ids: EpisodeIds,
}

impl ShowInfo {
    /// Display title of a show, falling back to its id
    pub fn show_title<'a>(&'a self, show: &'a str) -> &'a str {
        match self.titles.get(show).map(|t| t.trim()) {
            Some(title) if !title.is_empty() => title,
            _ => show,
        }
    }

    /// All show ids in map order
    pub fn shows(&self) -> Vec<String> {
        self.maps.keys().cloned().collect()
    }

    pub fn seasons(&self, show: &str) -> Option<&SeasonMap> {
        self.maps.get(show)
    }

    pub fn episodes(&self, show: &str, season: &str) -> Option<&EpisodeMap> {
        self.maps.get(show).and_then(|seasons| seasons.get(season))
    }

    /// External topic id of an episode, if the backend knows it
    pub fn episode_id(&self, show: &str, season: &str, episode: &str) -> Option<&SourceId> {
        self.ids.get(show)?.get(season)?.get(episode)
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// An importable transcript source, as listed by `/api/forums`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forum {
    pub id: SourceId,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub episodes: u64,
    #[serde(default)]
    pub range: Option<String>,
}

/// Which of the four navigator views is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Overview,
    Show,
    Season,
    Episode,
}

/// A navigation target
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    Overview,
    Show {
        show: String,
    },
    Season {
        show: String,
        season: String,
    },
    Episode {
        show: String,
        season: String,
        episode: String,
    },
}

impl Scope {
    pub fn show(show: impl Into<String>) -> Self {
        Scope::Show { show: show.into() }
    }

    pub fn season(show: impl Into<String>, season: impl Into<String>) -> Self {
        Scope::Season {
            show: show.into(),
            season: season.into(),
        }
    }

    pub fn episode(
        show: impl Into<String>,
        season: impl Into<String>,
        episode: impl Into<String>,
    ) -> Self {
        Scope::Episode {
            show: show.into(),
            season: season.into(),
            episode: episode.into(),
        }
    }

    /// Build a scope from a saved path of one to three ids
    pub fn from_path(path: &[String]) -> Option<Self> {
        match path {
            [show] => Some(Scope::show(show.as_str())),
            [show, season] => Some(Scope::season(show.as_str(), season.as_str())),
            [show, season, episode] => Some(Scope::episode(
                show.as_str(),
                season.as_str(),
                episode.as_str(),
            )),
            _ => None,
        }
    }

    /// The ids making up this scope, outermost first
    pub fn path(&self) -> Vec<&str> {
        match self {
            Scope::Overview => vec![],
            Scope::Show { show } => vec![show.as_str()],
            Scope::Season { show, season } => vec![show.as_str(), season.as_str()],
            Scope::Episode {
                show,
                season,
                episode,
            } => vec![show.as_str(), season.as_str(), episode.as_str()],
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Scope::Overview => Mode::Overview,
            Scope::Show { .. } => Mode::Show,
            Scope::Season { .. } => Mode::Season,
            Scope::Episode { .. } => Mode::Episode,
        }
    }

    pub fn show_id(&self) -> Option<&str> {
        match self {
            Scope::Overview => None,
            Scope::Show { show } | Scope::Season { show, .. } | Scope::Episode { show, .. } => {
                Some(show.as_str())
            }
        }
    }

    pub fn season_id(&self) -> Option<&str> {
        match self {
            Scope::Season { season, .. } | Scope::Episode { season, .. } => Some(season.as_str()),
            _ => None,
        }
    }

    pub fn episode_id(&self) -> Option<&str> {
        match self {
            Scope::Episode { episode, .. } => Some(episode.as_str()),
            _ => None,
        }
    }

    /// One level up; the overview has no parent
    pub fn parent(&self) -> Option<Scope> {
        match self {
            Scope::Overview => None,
            Scope::Show { .. } => Some(Scope::Overview),
            Scope::Season { show, .. } => Some(Scope::show(show.as_str())),
            Scope::Episode { show, season, .. } => {
                Some(Scope::season(show.as_str(), season.as_str()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_INFO: &str = r#"{
        "maps": {
            "99": {"2": {"1.txt": "2x01 - Return"}, "1": {"1.txt": null, "2.txt": "1x02 - Two"}},
            "12": {"S": {"Pilot.txt": null}}
        },
        "titles": {"99": "The Nines\n"},
        "ids": {"99": {"1": {"1.txt": 4512, "2.txt": "4513"}}}
    }"#;

    #[test]
    fn test_show_info_keeps_backend_order() {
        let info: ShowInfo = serde_json::from_str(SHOW_INFO).unwrap();
        assert_eq!(info.shows(), vec!["99", "12"]);
        let seasons: Vec<&String> = info.seasons("99").unwrap().keys().collect();
        assert_eq!(seasons, vec!["2", "1"]);
        assert_eq!(info.episodes("99", "1").unwrap().get("1.txt"), Some(&None));
    }

    #[test]
    fn test_show_title_falls_back_to_id() {
        let info: ShowInfo = serde_json::from_str(SHOW_INFO).unwrap();
        assert_eq!(info.show_title("99"), "The Nines");
        assert_eq!(info.show_title("12"), "12");
    }

    #[test]
    fn test_episode_ids_accept_numbers_and_strings() {
        let info: ShowInfo = serde_json::from_str(SHOW_INFO).unwrap();
        assert_eq!(info.episode_id("99", "1", "1.txt").unwrap().to_string(), "4512");
        assert_eq!(info.episode_id("99", "1", "2.txt").unwrap().to_string(), "4513");
        assert!(info.episode_id("12", "S", "Pilot.txt").is_none());
    }

    #[test]
    fn test_forum_defaults() {
        let forums: Vec<Forum> =
            serde_json::from_str(r#"[{"id": 77, "title": "Some Show"}]"#).unwrap();
        assert_eq!(forums[0].id, SourceId::Number(77));
        assert_eq!(forums[0].episodes, 0);
        assert!(forums[0].range.is_none());
    }

    #[test]
    fn test_scope_parent_chain() {
        let scope = Scope::episode("99", "1", "2.txt");
        assert_eq!(scope.mode(), Mode::Episode);
        let season = scope.parent().unwrap();
        assert_eq!(season, Scope::season("99", "1"));
        let show = season.parent().unwrap();
        assert_eq!(show.parent(), Some(Scope::Overview));
        assert_eq!(Scope::Overview.parent(), None);
    }

    #[test]
    fn test_scope_path_round_trip() {
        let scope = Scope::episode("99", "1", "2.txt");
        let path: Vec<String> = scope.path().into_iter().map(String::from).collect();
        assert_eq!(Scope::from_path(&path), Some(scope));
        assert_eq!(Scope::from_path(&[]), None);
    }
}
