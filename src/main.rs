use iced::widget::{column, container, row};
use iced::{Background, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

use clap::Parser;

mod api;
mod config;
mod state;
mod ui;

use api::{ApiClient, ApiError};
use config::{Args, Settings};
use state::analysis::AnalysisPanel;
use state::data::{Forum, Scope, ShowInfo};
use state::filter::PosFilter;
use state::frequency::WordKey;
use state::import::ImportPanel;
use state::library::Library;
use state::marked::MarkedWords;
use state::navigation::{mode_color, source_url, Transcript};
use state::preferences::ViewPreferences;
use state::saved::SavedPage;
use state::search::{compute_visibility, SearchState};
use state::visualization::{
    plan, Gallery, PlanOptions, Visualization, VisualizationKind, VisualizationRequest,
};
use ui::sidebar::{Section, Sidebar};

fn initial_window() -> Size {
    Size::new(1400.0, 900.0)
}

/// Main application state
struct TranscriptBrowser {
    settings: Settings,
    client: ApiClient,
    /// Saved pages and preferences
    library: Library,

    /// Bootstrap progress; `None` once both resources have loaded
    loading: Option<u8>,
    info: ShowInfo,
    forums: Vec<Forum>,

    scope: Scope,
    /// Bumped on every navigation so late transcripts are dropped
    nav_generation: u64,
    transcript: Option<Transcript>,

    analysis: AnalysisPanel,
    marked: MarkedWords,
    filter: PosFilter,
    show_more_filters: bool,
    search: SearchState,

    saved: Vec<SavedPage>,
    expanded: HashSet<Section>,
    import: ImportPanel,

    preferences: ViewPreferences,
    gallery: Gallery,
    window: Size,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    ShowInfoLoaded(Result<ShowInfo, ApiError>),
    ForumsLoaded(Result<Vec<Forum>, ApiError>),

    Navigate(Scope),
    /// Right click in the navigator
    NavigateUp,
    TranscriptLoaded(u64, Result<Transcript, ApiError>),
    FrequencyLoaded(u64, Result<String, ApiError>),
    OpenSource,

    ToggleQuickMode,
    ToggleMark(WordKey, u64),
    Unmark(WordKey),
    SearchInput(String),
    SearchSubmit,
    DismissHiddenNotice,
    SelectFilter(PosFilter),
    ToggleMoreFilters,

    ToggleSection(Section),
    SavePage,
    RemoveSavedPage(i64),

    ImportSearchInput(String),
    ImportSearchSubmit,
    Import(Forum),
    ImportFinished(Result<(), ApiError>),
    ImportRefreshed(Result<ShowInfo, ApiError>),

    SelectVisualization(VisualizationKind),
    ToggleVisualizeMultiple(bool),
    ToggleSmooth(bool),
    GenerateVisualization,
    VisualizationReady(Result<Visualization, ApiError>),
    ClearVisualizations,
    ExportVisualization(usize),

    WindowResized(Size),
}

impl TranscriptBrowser {
    /// Create the application and start fetching show info
    fn new(settings: Settings, client: ApiClient) -> (Self, Task<Message>) {
        let library = open_library(&settings);

        let preferences = library.load_preferences().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load preferences");
            ViewPreferences::default()
        });
        let saved = library.saved_pages().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load saved pages");
            Vec::new()
        });
        tracing::info!(
            server = %client.base(),
            library = ?library.path(),
            saved = saved.len(),
            "transcript browser initialized"
        );

        let fetch = {
            let client = client.clone();
            Task::perform(async move { client.show_info().await }, Message::ShowInfoLoaded)
        };

        (
            TranscriptBrowser {
                settings,
                client,
                library,
                loading: Some(0),
                info: ShowInfo::default(),
                forums: Vec::new(),
                scope: Scope::Overview,
                nav_generation: 0,
                transcript: None,
                analysis: AnalysisPanel::default(),
                marked: MarkedWords::default(),
                filter: PosFilter::All,
                show_more_filters: false,
                search: SearchState::default(),
                saved,
                expanded: HashSet::new(),
                import: ImportPanel::default(),
                preferences,
                gallery: Gallery::default(),
                window: initial_window(),
            },
            fetch,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowInfoLoaded(result) => {
                match result {
                    Ok(info) => self.info = info,
                    Err(e) => tracing::error!(error = %e, "could not load show info"),
                }
                self.loading = Some(1);
                let client = self.client.clone();
                Task::perform(async move { client.forums().await }, Message::ForumsLoaded)
            }
            Message::ForumsLoaded(result) => {
                match result {
                    Ok(forums) => self.forums = forums,
                    Err(e) => tracing::error!(error = %e, "could not load forums"),
                }
                self.loading = None;
                if self.info.is_empty() {
                    self.expanded.insert(Section::Help);
                }
                self.navigate(Scope::Overview)
            }

            Message::Navigate(scope) => self.navigate(scope),
            Message::NavigateUp => match self.scope.parent() {
                Some(parent) => self.navigate(parent),
                None => Task::none(),
            },
            Message::TranscriptLoaded(generation, result) => {
                if generation != self.nav_generation {
                    tracing::debug!(generation, "dropping stale transcript");
                    return Task::none();
                }
                match result {
                    Ok(transcript) => self.transcript = Some(transcript),
                    Err(e) => tracing::error!(error = %e, "could not load transcript"),
                }
                Task::none()
            }
            Message::FrequencyLoaded(generation, result) => {
                match result {
                    Ok(text) => {
                        if !self.analysis.accept(generation, &text, &mut self.marked) {
                            tracing::debug!(generation, "dropping stale frequency listing");
                        }
                    }
                    Err(e) if self.analysis.is_current(generation) => {
                        tracing::error!(error = %e, "could not load word frequency")
                    }
                    Err(_) => {}
                }
                Task::none()
            }
            Message::OpenSource => {
                let url = source_url(
                    &self.settings.source_base,
                    self.settings.home_forum,
                    &self.info,
                    &self.scope,
                );
                if let Some(url) = url {
                    if let Err(e) = open::that(&url) {
                        tracing::error!(%url, error = %e, "could not open source link");
                    }
                }
                Task::none()
            }

            Message::ToggleQuickMode => {
                self.preferences.quick_mode = !self.preferences.quick_mode;
                self.search.apply(None);
                self.save_preferences();
                Task::none()
            }
            Message::ToggleMark(key, count) => {
                self.marked.toggle(&key, count);
                Task::none()
            }
            Message::Unmark(key) => {
                self.marked.unmark(&key);
                Task::none()
            }
            Message::SearchInput(input) => {
                self.search.input = input;
                Task::none()
            }
            Message::SearchSubmit => {
                let term = self.search.input.trim().to_string();
                self.search.apply(Some(&term));
                Task::none()
            }
            Message::DismissHiddenNotice => {
                self.search.dismiss_notice();
                Task::none()
            }
            Message::SelectFilter(filter) => {
                self.filter = filter;
                self.search.apply(None);
                Task::none()
            }
            Message::ToggleMoreFilters => {
                self.show_more_filters = !self.show_more_filters;
                Task::none()
            }

            Message::ToggleSection(section) => {
                if !self.expanded.remove(&section) {
                    self.expanded.insert(section);
                }
                Task::none()
            }
            Message::SavePage => {
                match self.library.add_saved_page(&self.scope) {
                    Ok(Some(page)) => self.saved.push(page),
                    Ok(None) => {}
                    Err(e) => tracing::error!(error = %e, "could not save page"),
                }
                Task::none()
            }
            Message::RemoveSavedPage(id) => {
                if let Err(e) = self.library.remove_saved_page(id) {
                    tracing::error!(id, error = %e, "could not remove saved page");
                }
                self.saved.retain(|page| page.id != id);
                Task::none()
            }

            Message::ImportSearchInput(input) => {
                self.import.input = input;
                Task::none()
            }
            Message::ImportSearchSubmit => {
                let term = self.import.input.clone();
                if self.import.set_filter(&term) {
                    self.expanded.insert(Section::Import);
                }
                Task::none()
            }
            Message::Import(forum) => {
                if !self.import.begin(&forum) {
                    return Task::none();
                }
                tracing::info!(show = %forum.id, title = %forum.title, "importing show");
                let client = self.client.clone();
                Task::perform(
                    async move { client.add_show(&forum.id, &forum.title).await },
                    Message::ImportFinished,
                )
            }
            Message::ImportFinished(Ok(())) => {
                let client = self.client.clone();
                Task::perform(async move { client.show_info().await }, Message::ImportRefreshed)
            }
            Message::ImportFinished(Err(e)) => {
                tracing::error!(error = %e, "import failed");
                self.import.fail();
                Task::none()
            }
            Message::ImportRefreshed(result) => {
                match result {
                    Ok(info) => self.info = info,
                    Err(e) => tracing::error!(error = %e, "could not refresh show info after import"),
                }
                self.import.succeed();
                self.navigate(Scope::Overview)
            }

            Message::SelectVisualization(kind) => {
                self.preferences.visualization = kind;
                self.save_preferences();
                Task::none()
            }
            Message::ToggleVisualizeMultiple(multiple) => {
                self.preferences.visualize_multiple = multiple;
                self.save_preferences();
                Task::none()
            }
            Message::ToggleSmooth(smooth) => {
                self.preferences.smooth = smooth;
                self.save_preferences();
                Task::none()
            }
            Message::GenerateVisualization => {
                let options = PlanOptions {
                    smooth: self.preferences.smooth,
                    filter: self.filter,
                    viewport: ui::visualization_viewport(self.window),
                };
                let Some(plan) = plan(
                    self.preferences.visualization,
                    &self.marked,
                    &self.scope,
                    &self.info,
                    options,
                ) else {
                    return Task::none();
                };
                match self.gallery.start(plan, self.preferences.visualize_multiple) {
                    Some(request) => self.request_visualization(request),
                    None => Task::none(),
                }
            }
            Message::VisualizationReady(Ok(visualization)) => {
                match self.gallery.finish(visualization) {
                    Some(next) => self.request_visualization(next),
                    None => Task::none(),
                }
            }
            Message::VisualizationReady(Err(e)) => {
                tracing::error!(error = %e, "could not generate visualization");
                self.gallery.fail();
                Task::none()
            }
            Message::ClearVisualizations => {
                self.gallery.clear();
                Task::none()
            }
            Message::ExportVisualization(index) => {
                let Some(visualization) = self.gallery.get(index) else {
                    return Task::none();
                };
                let target = FileDialog::new()
                    .set_title("Export Visualization")
                    .set_file_name(format!("{}.png", visualization.file_stem))
                    .add_filter("PNG image", &["png"])
                    .save_file();

                if let Some(path) = target {
                    match std::fs::write(&path, &visualization.png) {
                        Ok(()) => tracing::info!(path = %path.display(), "visualization exported"),
                        Err(e) => tracing::error!(path = %path.display(), error = %e, "export failed"),
                    }
                }
                Task::none()
            }

            Message::WindowResized(size) => {
                self.window = size;
                Task::none()
            }
        }
    }

    /// Move to `scope`, rebuilding the navigator and requesting its analysis
    fn navigate(&mut self, scope: Scope) -> Task<Message> {
        tracing::debug!(?scope, "navigate");
        self.scope = scope;
        self.nav_generation += 1;
        self.transcript = None;
        // Re-apply the remembered search so the notice reflects the new listing
        self.search.apply(None);

        let mut tasks = Vec::new();

        if let Scope::Episode {
            show,
            season,
            episode,
        } = self.scope.clone()
        {
            let client = self.client.clone();
            let generation = self.nav_generation;
            tasks.push(Task::perform(
                async move { client.transcript(&show, &season, &episode).await },
                move |result| Message::TranscriptLoaded(generation, result),
            ));
        }

        if let Some(generation) = self.analysis.begin(&self.scope, &mut self.marked) {
            let client = self.client.clone();
            let scope = self.scope.clone();
            tasks.push(Task::perform(
                async move { client.frequency(&scope).await },
                move |result| Message::FrequencyLoaded(generation, result),
            ));
        }

        Task::batch(tasks)
    }

    fn request_visualization(&self, request: VisualizationRequest) -> Task<Message> {
        tracing::debug!(kind = %request.kind, show = %request.show, "requesting visualization");
        Task::perform(
            fetch_visualization(self.client.clone(), request),
            Message::VisualizationReady,
        )
    }

    fn save_preferences(&self) {
        if let Err(e) = self.library.save_preferences(&self.preferences) {
            tracing::warn!(error = %e, "could not save preferences");
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let path_bar = ui::navigator::path_bar(
            &self.info,
            &self.scope,
            self.loading,
            source_url(
                &self.settings.source_base,
                self.settings.home_forum,
                &self.info,
                &self.scope,
            )
            .is_some(),
        );

        let navigator = ui::navigator::navigator(
            &self.info,
            &self.forums,
            &self.scope,
            self.transcript.as_ref(),
        );

        let rows = self
            .analysis
            .rows(self.preferences.quick_mode, self.settings.quick_mode_limit);
        let visibility = compute_visibility(rows, self.filter, self.search.query().as_ref());
        let frequency = ui::frequency::FrequencyPane {
            placeholder: self.analysis.placeholder(),
            rows,
            notice: self.search.notice(&visibility),
            visibility,
            marked: &self.marked,
            search_input: &self.search.input,
            quick_mode: self.preferences.quick_mode,
        }
        .view();

        let sidebar = Sidebar {
            info: &self.info,
            saved: &self.saved,
            expanded: &self.expanded,
            filter: self.filter,
            show_more_filters: self.show_more_filters,
            import: &self.import,
            forums: &self.forums,
            marked: &self.marked,
        }
        .view();

        let main = row![
            container(navigator).width(Length::FillPortion(3)),
            container(frequency).width(Length::FillPortion(2)),
            container(sidebar).width(ui::SIDEBAR_WIDTH),
        ]
        .spacing(ui::SPACING)
        .height(Length::FillPortion(ui::MAIN_PORTION));

        let visualization = column![
            ui::visualization::visualization_bar(
                self.preferences.visualization,
                self.preferences.visualize_multiple,
                self.preferences.smooth,
                self.gallery.is_busy(),
            ),
            ui::visualization::gallery(&self.gallery),
        ]
        .spacing(ui::SPACING)
        .height(Length::FillPortion(ui::VISUALIZATION_PORTION));

        let tint = ui::rgb(mode_color(self.scope.mode()));
        container(column![path_bar, main, visualization].spacing(ui::SPACING))
            .padding(ui::PADDING)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(tint)),
                ..Default::default()
            })
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Open the configured library, falling back to memory so the app still starts
fn open_library(settings: &Settings) -> Library {
    let opened = match &settings.database {
        Some(path) => Library::open(path),
        None => Library::open_in_memory(),
    };
    match opened {
        Ok(library) => library,
        Err(e) => {
            tracing::error!(error = %e, "could not open library, saved pages will not persist");
            Library::open_in_memory().expect("Failed to create in-memory library")
        }
    }
}

/// Fetch a visualization and decode it off the UI thread
async fn fetch_visualization(
    client: ApiClient,
    request: VisualizationRequest,
) -> Result<Visualization, ApiError> {
    let png = client.visualize(&request).await?;
    let decoded = tokio::task::spawn_blocking(move || Visualization::decode(&request, png))
        .await
        .map_err(|e| ApiError::Image(e.to_string()))??;
    Ok(decoded)
}

fn main() -> iced::Result {
    let args = Args::parse();

    let settings = match Settings::load(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log)),
        )
        .init();

    let client = match ApiClient::new(&settings.server, settings.request_timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(server = %settings.server, error = %e, "invalid server");
            std::process::exit(2);
        }
    };

    iced::application(
        "Transcript Browser",
        TranscriptBrowser::update,
        TranscriptBrowser::view,
    )
    .theme(TranscriptBrowser::theme)
    .subscription(TranscriptBrowser::subscription)
    .window_size(initial_window())
    .centered()
    .run_with(move || TranscriptBrowser::new(settings, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::search::SearchQuery;

    fn browser() -> TranscriptBrowser {
        let settings = Settings {
            database: None,
            ..Settings::default()
        };
        let client = ApiClient::new(&settings.server, settings.request_timeout()).unwrap();
        let (app, _) = TranscriptBrowser::new(settings, client);
        app
    }

    fn send(app: &mut TranscriptBrowser, message: Message) {
        let _ = app.update(message);
    }

    #[test]
    fn test_bootstrap_failures_still_reach_overview() {
        let mut app = browser();
        assert_eq!(app.loading, Some(0));

        send(&mut app, Message::ShowInfoLoaded(Err(ApiError::Connection("refused".into()))));
        assert_eq!(app.loading, Some(1));
        send(&mut app, Message::ForumsLoaded(Ok(Vec::new())));

        assert_eq!(app.loading, None);
        assert_eq!(app.scope, Scope::Overview);
        assert!(app.expanded.contains(&Section::Help));
    }

    #[test]
    fn test_saved_page_navigates_back_to_its_scope() {
        let mut app = browser();
        let scope = Scope::episode("99", "2", "5.txt");

        send(&mut app, Message::Navigate(scope.clone()));
        send(&mut app, Message::SavePage);
        send(&mut app, Message::Navigate(Scope::Overview));
        send(&mut app, Message::SavePage);
        assert_eq!(app.saved.len(), 1);

        let saved = app.saved[0].scope.clone();
        send(&mut app, Message::Navigate(saved));
        assert_eq!(app.scope, scope);
        assert_eq!(app.library.saved_pages().unwrap()[0].scope, scope);

        let id = app.saved[0].id;
        send(&mut app, Message::RemoveSavedPage(id));
        assert!(app.saved.is_empty());
        assert!(app.library.saved_pages().unwrap().is_empty());
    }

    #[test]
    fn test_navigate_up() {
        let mut app = browser();
        send(&mut app, Message::NavigateUp);
        assert_eq!(app.scope, Scope::Overview);
        assert_eq!(app.nav_generation, 0);

        send(&mut app, Message::Navigate(Scope::episode("1", "3", "2.txt")));
        send(&mut app, Message::NavigateUp);
        assert_eq!(app.scope, Scope::season("1", "3"));
        send(&mut app, Message::NavigateUp);
        send(&mut app, Message::NavigateUp);
        assert_eq!(app.scope, Scope::Overview);
    }

    #[test]
    fn test_stale_transcript_is_dropped() {
        let mut app = browser();
        send(&mut app, Message::Navigate(Scope::episode("1", "1", "1.txt")));
        let first = app.nav_generation;
        send(&mut app, Message::Navigate(Scope::episode("1", "1", "2.txt")));
        let second = app.nav_generation;

        let late = Transcript::parse("Episode One\nold text");
        send(&mut app, Message::TranscriptLoaded(first, Ok(late)));
        assert!(app.transcript.is_none());

        let current = Transcript::parse("Episode Two\nnew text");
        send(&mut app, Message::TranscriptLoaded(second, Ok(current.clone())));
        assert_eq!(app.transcript, Some(current));
    }

    #[test]
    fn test_filter_change_keeps_search() {
        let mut app = browser();
        send(&mut app, Message::SearchInput("dog".into()));
        send(&mut app, Message::SearchSubmit);
        send(&mut app, Message::SelectFilter(PosFilter::Verb));

        assert_eq!(app.filter, PosFilter::Verb);
        assert_eq!(app.search.query(), Some(SearchQuery::parse("dog")));
        assert_eq!(app.search.input, "dog");
    }

    #[test]
    fn test_mark_and_unmark_from_panel() {
        let mut app = browser();
        send(&mut app, Message::Navigate(Scope::show("1")));
        assert!(app.analysis.is_current(1));
        send(
            &mut app,
            Message::FrequencyLoaded(1, Ok("run_VERB: 10\nbob_PROPN: 4".into())),
        );

        let run = WordKey::new("run", "VERB");
        let bob = WordKey::new("bob", "PROPN");
        send(&mut app, Message::ToggleMark(run.clone(), 10));
        let before: Vec<_> = app.marked.iter().cloned().collect();

        send(&mut app, Message::ToggleMark(bob.clone(), 4));
        assert!(app.marked.is_marked(&bob));
        send(&mut app, Message::Unmark(bob.clone()));

        assert!(!app.marked.is_marked(&bob));
        assert_eq!(app.marked.iter().cloned().collect::<Vec<_>>(), before);
    }
}
