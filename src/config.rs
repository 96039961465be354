/// Configuration: command line flags layered over an optional TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "transcript-browser";

/// Command line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "transcript-browser", version, about = "Browse TV transcripts and their word frequencies")]
pub struct Args {
    /// Root url of the analysis backend
    #[arg(long, env = "TRANSCRIPT_BROWSER_SERVER")]
    pub server: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Library database for saved pages and preferences
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Keep saved pages in memory only
    #[arg(long)]
    pub in_memory: bool,

    /// Log filter, e.g. `debug` or `transcript_browser=trace`
    #[arg(long)]
    pub log: Option<String>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Backend root url.
    pub server: String,
    /// Library database path; `None` keeps it in memory.
    pub database: Option<PathBuf>,
    /// Timeout for ordinary requests in seconds (imports are unbounded).
    pub request_timeout: u64,
    /// Entries rendered in quick mode.
    pub quick_mode_limit: usize,
    /// Transcript site the backend imports from.
    pub source_base: String,
    /// Forum listing all shows on the transcript site.
    pub home_forum: u64,
    /// Log filter used when `RUST_LOG` is unset.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        let database = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("library.db");

        Self {
            server: "http://localhost:5000/".to_string(),
            database: Some(database),
            request_timeout: 30,
            quick_mode_limit: 500,
            source_base: "https://transcripts.foreverdreaming.org".to_string(),
            home_forum: 1662,
            log: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Defaults, then the config file, then the command line.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        let path = args.config.clone().or_else(Config::default_path);
        if let Some(path) = path {
            // An explicitly named file must exist; the default one is optional
            if args.config.is_some() || path.exists() {
                Config::load(&path)?.apply_to_settings(&mut settings);
            }
        }
        args.apply_to_settings(&mut settings);
        Ok(settings)
    }
}

impl Args {
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref server) = self.server {
            settings.server = server.clone();
        }
        if let Some(ref database) = self.database {
            settings.database = Some(database.clone());
        }
        if self.in_memory {
            settings.database = None;
        }
        if let Some(ref log) = self.log {
            settings.log = log.clone();
        }
    }
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub database: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout: Option<u64>,
    #[serde(default)]
    pub quick_mode_limit: Option<usize>,
    #[serde(default)]
    pub source_base: Option<String>,
    #[serde(default)]
    pub home_forum: Option<u64>,
    #[serde(default)]
    pub log: Option<String>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref server) = self.server {
            settings.server = server.clone();
        }
        if let Some(ref database) = self.database {
            settings.database = Some(database.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(limit) = self.quick_mode_limit {
            settings.quick_mode_limit = limit;
        }
        if let Some(ref base) = self.source_base {
            settings.source_base = base.clone();
        }
        if let Some(forum) = self.home_forum {
            settings.home_forum = forum;
        }
        if let Some(ref log) = self.log {
            settings.log = log.clone();
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server, "http://localhost:5000/");
        assert_eq!(settings.quick_mode_limit, 500);
        assert_eq!(settings.home_forum, 1662);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert!(settings.database.unwrap().ends_with("transcript-browser/library.db"));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let config = Config::parse(
            r#"
            server = "http://analysis:8080/"
            quick_mode_limit = 200
            "#,
        )
        .unwrap();
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);
        assert_eq!(settings.server, "http://analysis:8080/");
        assert_eq!(settings.quick_mode_limit, 200);
        assert_eq!(settings.request_timeout, 30);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::parse("sever = \"typo\"").is_err());
    }

    #[test]
    fn test_args_win_over_file() {
        let config = Config::parse("server = \"http://file/\"\nlog = \"warn\"").unwrap();
        let args = Args::parse_from([
            "transcript-browser",
            "--server",
            "http://cli/",
            "--in-memory",
        ]);
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);
        args.apply_to_settings(&mut settings);
        assert_eq!(settings.server, "http://cli/");
        assert_eq!(settings.log, "warn");
        assert!(settings.database.is_none());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/transcript-browser.toml")),
            ..Default::default()
        };
        assert!(matches!(Settings::load(&args), Err(ConfigError::Io { .. })));
    }
}
