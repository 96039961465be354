/// Visualization planning and the image gallery
///
/// A plan turns the marked words and current scope into one or more
/// backend requests. The gallery runs them one at a time and keeps the
/// decoded images.

use std::collections::VecDeque;
use std::fmt;

use iced::widget::image::Handle;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

use super::data::{Scope, ShowInfo};
use super::filter::PosFilter;
use super::marked::MarkedWords;
use super::navigation::{episode_stem, episode_title, season_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationKind {
    #[default]
    Heatmap,
    LinePlot,
    WordCloud,
}

impl VisualizationKind {
    pub const ALL: [VisualizationKind; 3] = [
        VisualizationKind::Heatmap,
        VisualizationKind::LinePlot,
        VisualizationKind::WordCloud,
    ];

    /// Path segment under `/api/`
    pub fn endpoint(self) -> &'static str {
        match self {
            VisualizationKind::Heatmap => "heatmap",
            VisualizationKind::LinePlot => "lineplot",
            VisualizationKind::WordCloud => "wordcloud",
        }
    }

    /// Heatmaps and line plots are built from the marked words
    pub fn uses_marked_words(self) -> bool {
        self != VisualizationKind::WordCloud
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VisualizationKind::Heatmap => "Heat Map",
            VisualizationKind::LinePlot => "Line Plot",
            VisualizationKind::WordCloud => "Word Cloud",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizationRequest {
    pub kind: VisualizationKind,
    /// `word_PART` terms; empty for word clouds
    pub words: Vec<String>,
    pub show: String,
    pub season: Option<String>,
    pub episode: Option<String>,
    pub smooth: bool,
    /// Word cloud canvas in pixels
    pub size: Option<(u32, u32)>,
    pub filter: Option<PosFilter>,
    pub caption: String,
}

impl VisualizationRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.kind.uses_marked_words() {
            pairs.push(("words", self.words.join(",")));
            pairs.push(("show", self.show.clone()));
            pairs.push(("smooth", self.smooth.to_string()));
            if let Some(season) = &self.season {
                pairs.push(("season", season.clone()));
            }
        } else {
            if let Some((width, height)) = self.size {
                pairs.push(("width", width.to_string()));
                pairs.push(("height", height.to_string()));
            }
            pairs.push(("show", self.show.clone()));
            if let Some(season) = &self.season {
                pairs.push(("season", season.clone()));
            }
            if let Some(episode) = &self.episode {
                pairs.push(("episode", episode.clone()));
            }
            if let Some(filter) = self.filter {
                pairs.push(("filter", filter.tag().to_string()));
            }
        }
        pairs
    }

    /// Suggested file name when exporting the result
    pub fn file_stem(&self) -> String {
        let mut parts = vec![self.kind.endpoint().to_string(), self.show.clone()];
        parts.extend(self.season.clone());
        parts.extend(self.episode.as_deref().map(|e| episode_stem(e).to_string()));
        parts.join("-")
    }
}

/// Requests for one press of a generate button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub requests: Vec<VisualizationRequest>,
    /// One request per show, issued from the overview
    pub fan_out: bool,
}

/// Options the visualization bar carries into a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    pub smooth: bool,
    pub filter: PosFilter,
    /// Measured size of the image area
    pub viewport: (u32, u32),
}

fn caption(kind: VisualizationKind, info: &ShowInfo, scope: &Scope, show: &str) -> String {
    let mut caption = format!("{}: {}", kind, info.show_title(show));
    if let Some(season) = scope.season_id() {
        caption.push(' ');
        caption.push_str(&season_title(season));
    }
    if kind == VisualizationKind::WordCloud {
        if let Some(episode) = scope.episode_id() {
            caption.push(' ');
            caption.push_str(&episode_title(episode));
        }
    }
    caption
}

/// Work out what to request, or `None` when the button does nothing here
pub fn plan(
    kind: VisualizationKind,
    marked: &MarkedWords,
    scope: &Scope,
    info: &ShowInfo,
    options: PlanOptions,
) -> Option<Plan> {
    if kind.uses_marked_words() {
        if marked.is_empty() {
            return None;
        }
        let words = marked.visualization_terms();
        let request = |show: &str, scope: &Scope| VisualizationRequest {
            kind,
            words: words.clone(),
            show: show.to_string(),
            season: scope.season_id().map(String::from),
            episode: None,
            smooth: options.smooth,
            size: None,
            filter: None,
            caption: caption(kind, info, scope, show),
        };
        match scope.show_id() {
            None => Some(Plan {
                requests: info
                    .maps
                    .keys()
                    .map(|show| request(show, &Scope::show(show.as_str())))
                    .collect(),
                fan_out: true,
            }),
            Some(show) => Some(Plan {
                requests: vec![request(show, scope)],
                fan_out: false,
            }),
        }
    } else {
        let show = scope.show_id()?;
        let (width, height) = options.viewport;
        Some(Plan {
            requests: vec![VisualizationRequest {
                kind,
                words: Vec::new(),
                show: show.to_string(),
                season: scope.season_id().map(String::from),
                episode: scope.episode_id().map(String::from),
                smooth: options.smooth,
                size: Some((width, height.saturating_sub(3))),
                filter: (options.filter != PosFilter::All).then_some(options.filter),
                caption: caption(kind, info, scope, show),
            }],
            fan_out: false,
        })
    }
}

/// A decoded backend image
#[derive(Debug, Clone)]
pub struct Visualization {
    pub caption: String,
    pub file_stem: String,
    /// Original PNG bytes, kept for export
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

impl Visualization {
    /// Validate the PNG and read its dimensions
    pub fn decode(request: &VisualizationRequest, png: Vec<u8>) -> image::ImageResult<Self> {
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)?;
        Ok(Self {
            caption: request.caption.clone(),
            file_stem: request.file_stem(),
            width: decoded.width(),
            height: decoded.height(),
            handle: Handle::from_bytes(png.clone()),
            png,
        })
    }
}

/// Displayed images plus the queue of pending requests
#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<Visualization>,
    queue: VecDeque<VisualizationRequest>,
    in_flight: bool,
    replace_on_arrival: bool,
}

impl Gallery {
    /// Start a plan. Returns the first request to send, or `None` if busy.
    pub fn start(&mut self, plan: Plan, multiple: bool) -> Option<VisualizationRequest> {
        if self.in_flight {
            return None;
        }
        if plan.fan_out {
            if !multiple {
                self.images.clear();
            }
            self.replace_on_arrival = false;
        } else {
            self.replace_on_arrival = !multiple;
        }
        self.queue = plan.requests.into();
        self.next()
    }

    fn next(&mut self) -> Option<VisualizationRequest> {
        let request = self.queue.pop_front();
        self.in_flight = request.is_some();
        request
    }

    /// Store a finished image and hand back the next queued request
    pub fn finish(&mut self, visualization: Visualization) -> Option<VisualizationRequest> {
        if self.replace_on_arrival {
            self.images.clear();
        }
        self.images.push(visualization);
        self.next()
    }

    /// Abandon the rest of the queue
    pub fn fail(&mut self) {
        self.queue.clear();
        self.in_flight = false;
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn images(&self) -> &[Visualization] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&Visualization> {
        self.images.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::frequency::WordKey;
    use std::io::Cursor;

    fn info() -> ShowInfo {
        serde_json::from_str(
            r#"{"maps": {"99": {"1": {"1.txt": null}}, "12": {"2": {"3.txt": null}}},
                "titles": {"99": "The Nines"}}"#,
        )
        .unwrap()
    }

    fn marked() -> MarkedWords {
        let mut marked = MarkedWords::default();
        marked.toggle(&WordKey::new("Bob", "PROPN"), 1);
        marked.toggle(&WordKey::new("run", "VERB"), 1);
        marked
    }

    fn options() -> PlanOptions {
        PlanOptions {
            smooth: true,
            filter: PosFilter::All,
            viewport: (800, 403),
        }
    }

    fn png() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbImage::new(3, 2)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn image_for(request: &VisualizationRequest) -> Visualization {
        Visualization::decode(request, png()).unwrap()
    }

    #[test]
    fn test_heatmap_needs_marked_words() {
        let plan = plan(
            VisualizationKind::Heatmap,
            &MarkedWords::default(),
            &Scope::show("99"),
            &info(),
            options(),
        );
        assert!(plan.is_none());
    }

    #[test]
    fn test_heatmap_query_for_episode_sends_show_and_season() {
        let plan = plan(
            VisualizationKind::Heatmap,
            &marked(),
            &Scope::episode("99", "1", "1.txt"),
            &info(),
            options(),
        )
        .unwrap();
        assert!(!plan.fan_out);
        let pairs = plan.requests[0].query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("words", "bob_PROPN,run_VERB".to_string()),
                ("show", "99".to_string()),
                ("smooth", "true".to_string()),
                ("season", "1".to_string()),
            ]
        );
        assert_eq!(plan.requests[0].caption, "Heat Map: The Nines Season 1");
    }

    #[test]
    fn test_overview_fans_out_per_show() {
        let plan = plan(
            VisualizationKind::LinePlot,
            &marked(),
            &Scope::Overview,
            &info(),
            options(),
        )
        .unwrap();
        assert!(plan.fan_out);
        let shows: Vec<_> = plan.requests.iter().map(|r| r.show.as_str()).collect();
        assert_eq!(shows, vec!["99", "12"]);
        assert!(plan.requests.iter().all(|r| r.season.is_none()));
    }

    #[test]
    fn test_word_cloud() {
        let mut opts = options();
        assert!(plan(VisualizationKind::WordCloud, &marked(), &Scope::Overview, &info(), opts).is_none());

        opts.filter = PosFilter::Noun;
        let plan = plan(
            VisualizationKind::WordCloud,
            &MarkedWords::default(),
            &Scope::episode("12", "2", "3.txt"),
            &info(),
            opts,
        )
        .unwrap();
        let request = &plan.requests[0];
        assert_eq!(
            request.query_pairs(),
            vec![
                ("width", "800".to_string()),
                ("height", "400".to_string()),
                ("show", "12".to_string()),
                ("season", "2".to_string()),
                ("episode", "3.txt".to_string()),
                ("filter", "NOUN".to_string()),
            ]
        );
        assert_eq!(request.file_stem(), "wordcloud-12-2-3");
    }

    #[test]
    fn test_fan_out_is_sequential_and_appends() {
        let plan = plan(VisualizationKind::Heatmap, &marked(), &Scope::Overview, &info(), options())
            .unwrap();
        let mut gallery = Gallery::default();
        let first = gallery.start(plan.clone(), false).unwrap();
        assert!(gallery.is_busy());
        assert!(gallery.start(plan, false).is_none());

        let second = gallery.finish(image_for(&first)).unwrap();
        assert_eq!(second.show, "12");
        assert!(gallery.finish(image_for(&second)).is_none());
        assert!(!gallery.is_busy());
        assert_eq!(gallery.images().len(), 2);
    }

    #[test]
    fn test_single_request_replaces_unless_multiple() {
        let plan = plan(VisualizationKind::Heatmap, &marked(), &Scope::show("99"), &info(), options())
            .unwrap();
        let mut gallery = Gallery::default();
        for _ in 0..2 {
            let request = gallery.start(plan.clone(), false).unwrap();
            gallery.finish(image_for(&request));
        }
        assert_eq!(gallery.images().len(), 1);

        let request = gallery.start(plan, true).unwrap();
        gallery.finish(image_for(&request));
        assert_eq!(gallery.images().len(), 2);
        assert_eq!(gallery.images()[0].width, 3);
        gallery.clear();
        assert!(gallery.images().is_empty());
    }

    #[test]
    fn test_failure_aborts_fan_out() {
        let plan = plan(VisualizationKind::Heatmap, &marked(), &Scope::Overview, &info(), options())
            .unwrap();
        let mut gallery = Gallery::default();
        gallery.start(plan, false).unwrap();
        gallery.fail();
        assert!(!gallery.is_busy());
        assert!(gallery.images().is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let plan = plan(VisualizationKind::Heatmap, &marked(), &Scope::show("99"), &info(), options())
            .unwrap();
        assert!(Visualization::decode(&plan.requests[0], b"not a png".to_vec()).is_err());
    }
}
