//! RON configuration for the photo feed app.
//!
//! Looked up at `$PHOTO_FEED_CONFIG`, falling back to `./photo_feed.ron`.
//! A missing file means defaults; an unreadable, unparsable or invalid file
//! also means defaults, plus a warning that is logged once logging is up.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feed_engine::{FetchSettings, TagMode, DEFAULT_FEED_URL};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use super::ui::constants::{DEFAULT_COLUMNS, DEFAULT_TILE_WIDTH, MAX_COLUMNS, MIN_TILE_WIDTH};

pub const CONFIG_ENV_VAR: &str = "PHOTO_FEED_CONFIG";
const CONFIG_FILENAME: &str = "photo_feed.ron";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub grid: GridConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub tags: Vec<String>,
    pub tag_mode: TagModeSetting,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TagModeSetting {
    #[default]
    All,
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub tile_width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogTarget,
    pub file: PathBuf,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            tags: Vec::new(),
            tag_mode: TagModeSetting::All,
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
            max_bytes: defaults.max_bytes,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            tile_width: DEFAULT_TILE_WIDTH,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogTarget::File,
            file: PathBuf::from("./photo_feed.log"),
            level: LogLevel::Info,
        }
    }
}

impl FeedConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            feed_url: self.url.clone(),
            tags: self.tags.clone(),
            tag_mode: match self.tag_mode {
                TagModeSetting::All => TagMode::All,
                TagModeSetting::Any => TagMode::Any,
            },
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl AppConfig {
    /// Checks value ranges; the first violation is reported.
    pub fn validate(&self) -> Result<(), String> {
        if self.feed.url.trim().is_empty() {
            return Err("feed.url must not be empty".to_string());
        }
        if self.feed.connect_timeout_ms == 0 || self.feed.request_timeout_ms == 0 {
            return Err("feed timeouts must be greater than 0".to_string());
        }
        if self.feed.max_bytes == 0 {
            return Err("feed.max_bytes must be greater than 0".to_string());
        }
        if !(1..=MAX_COLUMNS).contains(&self.grid.columns) {
            return Err(format!(
                "grid.columns must be 1-{MAX_COLUMNS}, got {}",
                self.grid.columns
            ));
        }
        if self.grid.tile_width < MIN_TILE_WIDTH {
            return Err(format!(
                "grid.tile_width must be at least {MIN_TILE_WIDTH}, got {}",
                self.grid.tile_width
            ));
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the config at `path`, returning it together with any warnings to log.
pub fn load(path: &Path) -> (AppConfig, Vec<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), Vec::new());
        }
        Err(err) => {
            return (
                AppConfig::default(),
                vec![format!("Failed to read config from {:?}: {}", path, err)],
            );
        }
    };

    let config: AppConfig = match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            return (
                AppConfig::default(),
                vec![format!("Failed to parse config from {:?}: {}", path, err)],
            );
        }
    };

    match config.validate() {
        Ok(()) => (config, Vec::new()),
        Err(problem) => (
            AppConfig::default(),
            vec![format!("Ignoring config {:?}: {}", path, problem)],
        ),
    }
}
