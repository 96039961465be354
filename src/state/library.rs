use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use std::path::{Path, PathBuf};

use super::data::Scope;
use super::preferences::ViewPreferences;
use super::saved::SavedPage;

/// The Library is the local SQLite store.
/// It keeps the user's saved pages and view preferences; everything else
/// comes from the analysis backend.
pub struct Library {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl Library {
    /// Open (or create) the library at `path`, creating parent directories.
    pub fn open(path: &Path) -> SqlResult<Self> {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(dir = %parent.display(), error = %e, "could not create library directory");
                return Err(rusqlite::Error::InvalidPath(parent.to_path_buf()));
            }
        }

        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "library opened");

        let mut library = Library {
            conn,
            db_path: Some(path.to_path_buf()),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// A throwaway library, used for `--in-memory` and when the file cannot be opened
    pub fn open_in_memory() -> SqlResult<Self> {
        let mut library = Library {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Create tables if they don't exist.
    fn init_schema(&mut self) -> SqlResult<()> {
        // One row per saved page; season and episode are NULL for shallower pages
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS saved_pages (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                show            TEXT NOT NULL,
                season          TEXT,
                episode         TEXT,
                saved_at        INTEGER NOT NULL
            )",
            [],
        )?;

        // Single row holding the preferences as JSON
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                id              INTEGER PRIMARY KEY CHECK (id = 1),
                settings_json   TEXT NOT NULL
            )",
            [],
        )?;

        tracing::debug!("library schema initialized");
        Ok(())
    }

    /// Path of the database file, `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Append a saved page. The overview cannot be saved.
    pub fn add_saved_page(&self, scope: &Scope) -> SqlResult<Option<SavedPage>> {
        let Some(show) = scope.show_id() else {
            return Ok(None);
        };
        let saved_at = Utc::now();
        self.conn.execute(
            "INSERT INTO saved_pages (show, season, episode, saved_at) VALUES (?1, ?2, ?3, ?4)",
            params![show, scope.season_id(), scope.episode_id(), saved_at.timestamp()],
        )?;

        Ok(Some(SavedPage {
            id: self.conn.last_insert_rowid(),
            scope: scope.clone(),
            saved_at,
        }))
    }

    pub fn remove_saved_page(&self, id: i64) -> SqlResult<()> {
        self.conn
            .execute("DELETE FROM saved_pages WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// All saved pages in the order they were added
    pub fn saved_pages(&self) -> SqlResult<Vec<SavedPage>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, show, season, episode, saved_at FROM saved_pages ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let parts: [Option<String>; 3] = [row.get(1)?, row.get(2)?, row.get(3)?];
            let path: Vec<String> = parts.into_iter().map_while(|part| part).collect();
            let saved_at: i64 = row.get(4)?;
            Ok((id, path, saved_at))
        })?;

        let mut pages = Vec::new();
        for row in rows {
            let (id, path, saved_at) = row?;
            match Scope::from_path(&path) {
                Some(scope) => pages.push(SavedPage {
                    id,
                    scope,
                    saved_at: DateTime::from_timestamp(saved_at, 0).unwrap_or_default(),
                }),
                None => tracing::warn!(id, "skipping saved page with an invalid path"),
            }
        }

        Ok(pages)
    }

    /// Stored preferences, or defaults if none were saved or they no longer parse
    pub fn load_preferences(&self) -> SqlResult<ViewPreferences> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT settings_json FROM preferences WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(match json {
            Some(json) => ViewPreferences::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable preferences");
                ViewPreferences::default()
            }),
            None => ViewPreferences::default(),
        })
    }

    pub fn save_preferences(&self, preferences: &ViewPreferences) -> SqlResult<()> {
        let json = preferences
            .to_json()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        self.conn.execute(
            "INSERT INTO preferences (id, settings_json) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET settings_json = excluded.settings_json",
            params![json],
        )?;
        Ok(())
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
