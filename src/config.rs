// Configuration loading and parsing (config/scorecard.toml).
//
// Every field has a default, so a missing config file yields a fully
// working configuration pointed at the published season feed.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::stats::categories::Mode;

/// The published season results spreadsheet.
const DEFAULT_FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQdTK9Y2OsQTjWCNXjc2tx6OTfAM0vDA_t1o82WRkbf_xj-9Pipnu-DC4wDXDso2J3kQz23pEyN30Fh/pub?output=csv";

const DEFAULT_TEAM: &str = "Yankees";
const DEFAULT_TTL_HOURS: u64 = 24;
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_CONCURRENCY: usize = 8;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub team: String,
    pub mode: Mode,
    pub cache_path: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            team: DEFAULT_TEAM.to_string(),
            mode: Mode::Classic,
            cache_path: default_cache_path(),
            cache_ttl: Duration::from_secs(DEFAULT_TTL_HOURS * 3600),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Platform cache directory when available, falling back to the working
/// directory.
fn default_cache_path() -> String {
    match directories::ProjectDirs::from("", "", "scorecard") {
        Some(dirs) => dirs
            .cache_dir()
            .join("leaderboards.db")
            .to_string_lossy()
            .into_owned(),
        None => "scorecard-cache.db".to_string(),
    }
}

// ---------------------------------------------------------------------------
// scorecard.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for scorecard.toml. Every section and field
/// is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    feed: FeedSection,
    #[serde(default)]
    leaderboards: LeaderboardsSection,
    #[serde(default)]
    http: HttpSection,
    #[serde(default)]
    cache: CacheSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FeedSection {
    url: Option<String>,
    team: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LeaderboardsSection {
    mode: Option<String>,
    ttl_hours: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct HttpSection {
    timeout_secs: Option<u64>,
    concurrency: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CacheSection {
    path: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `config/scorecard.toml` under `base_dir`.
/// A missing file is not an error; defaults apply field by field.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("scorecard.toml");

    let file: ConfigFile = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?
    } else {
        ConfigFile::default()
    };

    let defaults = Config::default();

    let mode = match file.leaderboards.mode {
        Some(raw) => raw
            .parse::<Mode>()
            .map_err(|message| ConfigError::Validation {
                field: "leaderboards.mode".to_string(),
                message,
            })?,
        None => defaults.mode,
    };

    let config = Config {
        feed_url: file.feed.url.unwrap_or(defaults.feed_url),
        team: file.feed.team.unwrap_or(defaults.team),
        mode,
        cache_path: file.cache.path.unwrap_or(defaults.cache_path),
        cache_ttl: Duration::from_secs(
            file.leaderboards.ttl_hours.unwrap_or(DEFAULT_TTL_HOURS) * 3600,
        ),
        request_timeout: Duration::from_secs(
            file.http.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        concurrency: file.http.concurrency.unwrap_or(defaults.concurrency),
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    load_config_from(&cwd)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.feed_url.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "feed.url".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if config.cache_ttl.is_zero() {
        return Err(ConfigError::Validation {
            field: "leaderboards.ttl_hours".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if config.request_timeout.is_zero() {
        return Err(ConfigError::Validation {
            field: "http.timeout_secs".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if config.concurrency == 0 {
        return Err(ConfigError::Validation {
            field: "http.concurrency".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
