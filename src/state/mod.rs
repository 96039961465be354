/// State management module
///
/// This module holds the interaction logic behind the window, free of widgets:
/// - Local SQLite store for saved pages and preferences (library.rs)
/// - Backend data model and navigation scope (data.rs)
/// - Navigator rows, breadcrumb and titles (navigation.rs)
/// - Frequency listing, filter, search and marks (frequency.rs, filter.rs, search.rs, marked.rs, analysis.rs)
/// - Visualization planning and gallery (visualization.rs)
/// - Import progress (import.rs)
/// - Saved pages and persisted view preferences (saved.rs, preferences.rs)

pub mod analysis;
pub mod data;
pub mod filter;
pub mod frequency;
pub mod import;
pub mod library;
pub mod marked;
pub mod navigation;
pub mod preferences;
pub mod saved;
pub mod search;
pub mod visualization;
