/// Navigator view models
///
/// Everything the navigator shows is derived from the current `Scope`
/// and the show info on each transition: list rows, breadcrumb, tint,
/// source link and aired range.

use super::data::{Forum, Mode, Scope, SeasonMap, ShowInfo};
use super::frequency::format_count;

/// `parseInt` semantics: optional sign and leading digits after whitespace
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Whole-string numeric ids (`"3"`, `"03"`), as opposed to `"3b"`
fn numeric_id(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.parse::<f64>().is_err() {
        return None;
    }
    leading_int(trimmed)
}

pub fn season_title(season: &str) -> String {
    match season {
        "S" => "Specials".to_string(),
        "other" => "Other".to_string(),
        _ => match numeric_id(season) {
            Some(n) => format!("Season {}", n),
            None => season.to_string(),
        },
    }
}

/// Filename up to `.txt`
pub fn episode_stem(episode: &str) -> &str {
    episode.split(".txt").next().unwrap_or(episode)
}

pub fn episode_title(episode: &str) -> String {
    let stem = episode_stem(episode);
    match numeric_id(stem) {
        Some(n) => format!("Episode {}", n),
        None => stem.to_string(),
    }
}

/// Row title in the season view.
///
/// Stored titles look like `"1x05 - The Pilot"`; those become `"5. The Pilot"`
/// using the number from the filename.
pub fn episode_list_title(episode: &str, stored: Option<&str>) -> String {
    let title = match stored {
        Some(title) if !title.is_empty() => title,
        _ => episode,
    };
    match title.split_once(" - ") {
        Some((_, rest)) => {
            let stem = episode_stem(episode);
            match leading_int(stem) {
                Some(n) => format!("{}. {}", n, rest),
                None => format!("{}. {}", stem, rest),
            }
        }
        None => title.to_string(),
    }
}

/// Numeric seasons ascending, then the rest in backend order
pub fn sorted_seasons(seasons: &SeasonMap) -> Vec<&str> {
    let mut ids: Vec<&str> = seasons.keys().map(String::as_str).collect();
    ids.sort_by_key(|id| match leading_int(id) {
        Some(n) => (false, n),
        None => (true, 0),
    });
    ids
}

pub fn count_episodes(info: &ShowInfo, show: &str, season: Option<&str>) -> usize {
    match season {
        Some(season) => info.episodes(show, season).map_or(0, |e| e.len()),
        None => info
            .seasons(show)
            .map_or(0, |seasons| seasons.values().map(|e| e.len()).sum()),
    }
}

pub fn episode_count_label(count: usize) -> String {
    format!(
        "{} Episode{}",
        format_count(count as u64),
        if count == 1 { "" } else { "s" }
    )
}

/// A clickable row in the overview, show or season list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    /// Right-aligned episode count, where one is shown
    pub detail: Option<String>,
    pub target: Scope,
}

/// Rows for the list views; the episode view renders its transcript instead
pub fn nav_items(info: &ShowInfo, scope: &Scope) -> Vec<NavItem> {
    match scope {
        Scope::Overview => info
            .maps
            .keys()
            .map(|show| NavItem {
                label: info.show_title(show).to_string(),
                detail: Some(episode_count_label(count_episodes(info, show, None))),
                target: Scope::show(show.as_str()),
            })
            .collect(),
        Scope::Show { show } => info
            .seasons(show)
            .map(|seasons| {
                sorted_seasons(seasons)
                    .into_iter()
                    .map(|season| NavItem {
                        label: season_title(season),
                        detail: Some(episode_count_label(count_episodes(
                            info,
                            show,
                            Some(season),
                        ))),
                        target: Scope::season(show.as_str(), season),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        Scope::Season { show, season } => info
            .episodes(show, season)
            .map(|episodes| {
                episodes
                    .iter()
                    .map(|(episode, stored)| NavItem {
                        label: episode_list_title(episode, stored.as_deref()),
                        detail: None,
                        target: Scope::episode(show.as_str(), season.as_str(), episode.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        Scope::Episode { .. } => Vec::new(),
    }
}

/// One breadcrumb segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    /// Raw identifier, shown as a tooltip
    pub id: Option<String>,
    pub target: Scope,
}

pub fn breadcrumb(info: &ShowInfo, scope: &Scope) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        label: "Home".to_string(),
        id: None,
        target: Scope::Overview,
    }];
    if let Some(show) = scope.show_id() {
        crumbs.push(Crumb {
            label: info.show_title(show).to_string(),
            id: Some(show.to_string()),
            target: Scope::show(show),
        });
        if let Some(season) = scope.season_id() {
            crumbs.push(Crumb {
                label: season_title(season),
                id: Some(season.to_string()),
                target: Scope::season(show, season),
            });
            if let Some(episode) = scope.episode_id() {
                crumbs.push(Crumb {
                    label: episode_title(episode),
                    id: Some(episode.to_string()),
                    target: Scope::episode(show, season, episode),
                });
            }
        }
    }
    crumbs
}

/// Background tint per mode, as RGB
pub fn mode_color(mode: Mode) -> (u8, u8, u8) {
    match mode {
        Mode::Overview => (255, 255, 224),
        Mode::Show => (173, 216, 230),
        Mode::Season => (144, 238, 144),
        Mode::Episode => (240, 128, 128),
    }
}

/// Link to the scope's page on the transcript site
pub fn source_url(base: &str, home_forum: u64, info: &ShowInfo, scope: &Scope) -> Option<String> {
    let base = base.trim_end_matches('/');
    match scope {
        Scope::Overview => Some(format!("{}/viewforum.php?f={}", base, home_forum)),
        Scope::Show { show } | Scope::Season { show, .. } => {
            Some(format!("{}/viewforum.php?f={}", base, show))
        }
        Scope::Episode {
            show,
            season,
            episode,
        } => info
            .episode_id(show, season, episode)
            .map(|id| format!("{}/viewtopic.php?t={}", base, id)),
    }
}

pub fn aired_range(forums: &[Forum], show: &str) -> String {
    match forums.iter().find(|forum| forum.id.to_string() == show) {
        None => "Unknown (Show not found)".to_string(),
        Some(forum) => match forum.range.as_deref() {
            Some(range) if !range.is_empty() => range.to_string(),
            _ => "Unknown (Range not found)".to_string(),
        },
    }
}

/// A transcript split into its title line and body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub title: String,
    pub body: String,
}

impl Transcript {
    pub fn parse(text: &str) -> Self {
        match text.split_once('\n') {
            Some((title, body)) => Self {
                title: title.to_string(),
                body: body.to_string(),
            },
            None => Self {
                title: text.to_string(),
                body: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::SourceId;

    fn info() -> ShowInfo {
        serde_json::from_str(
            r#"{
                "maps": {
                    "99": {
                        "10": {"1.txt": null},
                        "S": {"x.txt": null},
                        "2": {"1.txt": null, "2.txt": null},
                        "other": {"y.txt": null},
                        "1": {"5.txt": "1x05 - The Pilot - Part 2", "6.txt": null}
                    },
                    "12": {"1": {"1.txt": null}}
                },
                "titles": {"99": "The Nines"},
                "ids": {"99": {"1": {"5.txt": 4512}}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_season_titles() {
        assert_eq!(season_title("S"), "Specials");
        assert_eq!(season_title("other"), "Other");
        assert_eq!(season_title("3"), "Season 3");
        assert_eq!(season_title("03"), "Season 3");
        assert_eq!(season_title("3b"), "3b");
    }

    #[test]
    fn test_episode_titles() {
        assert_eq!(episode_title("7.txt"), "Episode 7");
        assert_eq!(episode_title("Pilot.txt"), "Pilot");
    }

    #[test]
    fn test_episode_list_title() {
        assert_eq!(
            episode_list_title("5.txt", Some("5 - The Pilot Episode")),
            "5. The Pilot Episode"
        );
        assert_eq!(
            episode_list_title("5.txt", Some("1x05 - The Pilot - Part 2")),
            "5. The Pilot - Part 2"
        );
        assert_eq!(episode_list_title("6.txt", None), "6.txt");
        assert_eq!(episode_list_title("6.txt", Some("Plain")), "Plain");
    }

    #[test]
    fn test_seasons_sort_numeric_then_encounter_order() {
        let info = info();
        let seasons = sorted_seasons(info.seasons("99").unwrap());
        assert_eq!(seasons, vec!["1", "2", "10", "S", "other"]);
    }

    #[test]
    fn test_overview_items_count_all_seasons() {
        let items = nav_items(&info(), &Scope::Overview);
        assert_eq!(items[0].label, "The Nines");
        assert_eq!(items[0].detail.as_deref(), Some("7 Episodes"));
        assert_eq!(items[1].label, "12");
        assert_eq!(items[1].detail.as_deref(), Some("1 Episode"));
        assert_eq!(items[1].target, Scope::show("12"));
    }

    #[test]
    fn test_season_items_keep_map_order() {
        let items = nav_items(&info(), &Scope::season("99", "1"));
        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["5. The Pilot - Part 2", "6.txt"]);
        assert_eq!(items[1].target, Scope::episode("99", "1", "6.txt"));
    }

    #[test]
    fn test_breadcrumb() {
        let crumbs = breadcrumb(&info(), &Scope::episode("99", "S", "x.txt"));
        let labels: Vec<_> = crumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Home", "The Nines", "Specials", "x"]);
        assert_eq!(crumbs[2].id.as_deref(), Some("S"));
        assert_eq!(crumbs[1].target, Scope::show("99"));
        assert_eq!(breadcrumb(&info(), &Scope::Overview).len(), 1);
    }

    #[test]
    fn test_source_urls() {
        let base = "https://transcripts.foreverdreaming.org/";
        let info = info();
        assert_eq!(
            source_url(base, 1662, &info, &Scope::Overview).unwrap(),
            "https://transcripts.foreverdreaming.org/viewforum.php?f=1662"
        );
        assert_eq!(
            source_url(base, 1662, &info, &Scope::season("99", "1")).unwrap(),
            "https://transcripts.foreverdreaming.org/viewforum.php?f=99"
        );
        assert_eq!(
            source_url(base, 1662, &info, &Scope::episode("99", "1", "5.txt")).unwrap(),
            "https://transcripts.foreverdreaming.org/viewtopic.php?t=4512"
        );
        assert!(source_url(base, 1662, &info, &Scope::episode("99", "1", "6.txt")).is_none());
    }

    #[test]
    fn test_aired_range() {
        let forums = vec![
            Forum {
                id: SourceId::Number(99),
                title: "The Nines".into(),
                desc: String::new(),
                episodes: 7,
                range: Some("2001 - 2004".into()),
            },
            Forum {
                id: SourceId::Text("12".into()),
                title: "Twelve".into(),
                desc: String::new(),
                episodes: 1,
                range: None,
            },
        ];
        assert_eq!(aired_range(&forums, "99"), "2001 - 2004");
        assert_eq!(aired_range(&forums, "12"), "Unknown (Range not found)");
        assert_eq!(aired_range(&forums, "5"), "Unknown (Show not found)");
    }

    #[test]
    fn test_transcript_split() {
        let transcript = Transcript::parse("1x01 - Pilot\nHello.\nBye.");
        assert_eq!(transcript.title, "1x01 - Pilot");
        assert_eq!(transcript.body, "Hello.\nBye.");
        assert_eq!(Transcript::parse("Only").body, "");
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("12abc"), Some(12));
        assert_eq!(leading_int("  -3"), Some(-3));
        assert_eq!(leading_int("S"), None);
    }
}
