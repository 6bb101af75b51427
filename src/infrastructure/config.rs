use super::api::DEFAULT_API_URL;
use super::persistence::DEFAULT_FAVORITES_FILE;
use std::path::PathBuf;

/// Default log destination; the terminal itself is owned by the UI.
pub const DEFAULT_LOG_FILE: &str = "rmdex.log";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be true or false, got {value:?}")]
    InvalidBool { key: &'static str, value: String },
}

/// Runtime configuration loaded from environment variables.
///
/// All fields have defaults that talk to the public catalog and keep state
/// in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog base endpoint.
    pub api_url: String,
    /// File holding the persisted favorite ids.
    pub favorites_file: PathBuf,
    /// File receiving `tracing` output.
    pub log_file: PathBuf,
    /// Jump back to page 1 whenever the filters change.
    pub reset_page_on_filter_change: bool,
    /// Drop reload responses that are not the latest one issued.
    pub discard_stale_responses: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            favorites_file: PathBuf::from(DEFAULT_FAVORITES_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            reset_page_on_filter_change: false,
            discard_stale_responses: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                         | Default                           |
    /// |---------------------------------|-----------------------------------|
    /// | `RMDEX_API_URL`                 | `https://rickandmortyapi.com/api` |
    /// | `RMDEX_FAVORITES_FILE`          | `rickAndMortyFavorites.json`      |
    /// | `RMDEX_LOG_FILE`                | `rmdex.log`                       |
    /// | `RMDEX_RESET_PAGE_ON_FILTER`    | `false`                           |
    /// | `RMDEX_DISCARD_STALE_RESPONSES` | `true`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            api_url: text("RMDEX_API_URL").unwrap_or(defaults.api_url),
            favorites_file: text("RMDEX_FAVORITES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.favorites_file),
            log_file: text("RMDEX_LOG_FILE").map(PathBuf::from).unwrap_or(defaults.log_file),
            reset_page_on_filter_change: parse_bool(
                "RMDEX_RESET_PAGE_ON_FILTER",
                text("RMDEX_RESET_PAGE_ON_FILTER"),
                defaults.reset_page_on_filter_change,
            )?,
            discard_stale_responses: parse_bool(
                "RMDEX_DISCARD_STALE_RESPONSES",
                text("RMDEX_DISCARD_STALE_RESPONSES"),
                defaults.discard_stale_responses,
            )?,
        })
    }
}

fn parse_bool(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value }),
    }
}
