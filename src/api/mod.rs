/// Client for the transcript analysis backend.
///
/// The backend serves the show catalogue as JSON, stored analysis files
/// through `/api/read`, and renders visualizations as base64 PNGs.

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

use crate::state::data::Scope;

/// Backend file path of a scope's word frequency listing; the overview has none
pub fn frequency_path(scope: &Scope) -> Option<String> {
    match scope {
        Scope::Overview => None,
        Scope::Show { show } => Some(format!("{}/analysis/word_frequency/show.txt", show)),
        Scope::Season { show, season } => Some(format!(
            "{}/analysis/word_frequency/season/{}.txt",
            show, season
        )),
        Scope::Episode {
            show,
            season,
            episode,
        } => Some(format!(
            "{}/analysis/word_frequency/episode/{}/{}",
            show, season, episode
        )),
    }
}

pub fn transcript_path(show: &str, season: &str, episode: &str) -> String {
    format!("{}/formatted/{}/{}", show, season, episode)
}

/// Undo the JSON string wrapping `/api/read` puts around file contents.
///
/// The body is normally a valid JSON string. If it is not, the outer quotes
/// and trailing newline are dropped and the common escapes restored by hand.
pub fn unwrap_text_blob(raw: &str) -> String {
    if let Ok(text) = serde_json::from_str::<String>(raw.trim_end()) {
        return text;
    }

    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    chars.next_back();
    chars
        .as_str()
        .replace("\\'", "'")
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_paths() {
        assert_eq!(frequency_path(&Scope::Overview), None);
        assert_eq!(
            frequency_path(&Scope::show("99")).unwrap(),
            "99/analysis/word_frequency/show.txt"
        );
        assert_eq!(
            frequency_path(&Scope::season("99", "2")).unwrap(),
            "99/analysis/word_frequency/season/2.txt"
        );
        assert_eq!(
            frequency_path(&Scope::episode("99", "2", "5.txt")).unwrap(),
            "99/analysis/word_frequency/episode/2/5.txt"
        );
    }

    #[test]
    fn test_transcript_path() {
        assert_eq!(transcript_path("99", "S", "x.txt"), "99/formatted/S/x.txt");
    }

    #[test]
    fn test_unwrap_text_blob() {
        let raw = "\"Pilot\\nHe said \\\"hi\\\" and didn\\'t stop\\n\"\n";
        assert_eq!(unwrap_text_blob(raw), "Pilot\nHe said \"hi\" and didn't stop\n");
    }

    #[test]
    fn test_unwrap_json_escapes() {
        let raw = "\"caf\\u00e9\\u2019s \\\\o/\\nnext\"\n";
        assert_eq!(unwrap_text_blob(raw), "caf\u{e9}\u{2019}s \\o/\nnext");
    }

    #[test]
    fn test_unwrap_short_blob() {
        assert_eq!(unwrap_text_blob(""), "");
        assert_eq!(unwrap_text_blob("\"\"\n"), "");
    }
}
