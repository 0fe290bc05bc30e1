//! Configuration file loading with precedence handling.

use crate::config::template::{COVER_URL, HTML_URL, TemplateContext};
use crate::model::{SortKey, TemplateError};
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use thiserror::Error;

/// Default record list location, relative to the working directory.
pub const DEFAULT_ZONES_URL: &str = "zones.json";

/// Default base location substituted for `{COVER_URL}`.
pub const DEFAULT_COVER_URL: &str = "https://cdn.jsdelivr.net/gh/hummingbird-9/covers@main";

/// Default base location substituted for `{HTML_URL}`.
pub const DEFAULT_HTML_URL: &str = "https://cdn.jsdelivr.net/gh/hummingbird-9/html@main";

/// Default number of cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/zonegrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Record list location (HTTP(S) URL or file path).
    #[serde(default)]
    pub zones_url: Option<String>,

    /// Base location substituted for `{COVER_URL}`.
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Base location substituted for `{HTML_URL}`.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Cards per page. Zero is rejected at merge time.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Sort applied after the initial load.
    #[serde(default)]
    pub default_sort: Option<SortKey>,

    /// Start in dark mode (a stored preference wins over this).
    #[serde(default)]
    pub dark_mode: Option<bool>,

    /// Directory holding the persisted key-value store and cookie jar.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Directory receiving `.data` exports from the TUI.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Directory receiving popped-out viewer documents.
    #[serde(default)]
    pub detached_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Record list location, URL or path.
    pub zones_url: String,
    /// Replacement for `{COVER_URL}`.
    pub cover_url: String,
    /// Replacement for `{HTML_URL}`.
    pub html_url: String,
    /// Records per "Load More" page.
    pub page_size: NonZeroUsize,
    /// Sort applied at startup.
    pub default_sort: SortKey,
    /// Theme when no preference is stored.
    pub dark_mode: bool,
    /// Directory holding the key-value store and cookie jar.
    pub state_dir: PathBuf,
    /// Target of the in-app export.
    pub export_dir: PathBuf,
    /// Where popped-out documents are written.
    pub detached_dir: PathBuf,
    /// Log file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            zones_url: DEFAULT_ZONES_URL.to_string(),
            cover_url: DEFAULT_COVER_URL.to_string(),
            html_url: DEFAULT_HTML_URL.to_string(),
            page_size: default_page_size(),
            default_sort: SortKey::Unordered,
            dark_mode: false,
            state_dir: default_state_dir(),
            export_dir: default_export_dir(),
            detached_dir: default_state_dir().join("detached"),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Build the placeholder context for record templates.
    ///
    /// # Errors
    ///
    /// Fails if either base location is configured as an empty string.
    pub fn template_context(&self) -> Result<TemplateContext, TemplateError> {
        let bases = [(COVER_URL, &self.cover_url), (HTML_URL, &self.html_url)];
        let values: HashMap<&str, String> = bases
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name, value.clone()))
            .collect();
        TemplateContext::new(&values)
    }
}

fn default_page_size() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN)
}

/// Resolve default state directory.
///
/// Returns `~/.local/share/zonegrid` on Unix-like systems, or the platform
/// data directory elsewhere. Falls back to `./.zonegrid`.
pub fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("zonegrid"))
        .unwrap_or_else(|| PathBuf::from(".zonegrid"))
}

/// Resolve default export directory (the platform downloads folder).
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/zonegrid/zonegrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("zonegrid").join("zonegrid.log")
    } else {
        PathBuf::from("zonegrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/zonegrid/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zonegrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ZONEGRID_CONFIG` environment variable
/// 3. Default path `~/.config/zonegrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("ZONEGRID_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// A `page_size` of zero falls back to the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        zones_url: config.zones_url.unwrap_or(defaults.zones_url),
        cover_url: config.cover_url.unwrap_or(defaults.cover_url),
        html_url: config.html_url.unwrap_or(defaults.html_url),
        page_size: config
            .page_size
            .and_then(NonZeroUsize::new)
            .unwrap_or(defaults.page_size),
        default_sort: config.default_sort.unwrap_or(defaults.default_sort),
        dark_mode: config.dark_mode.unwrap_or(defaults.dark_mode),
        detached_dir: config
            .detached_dir
            .or_else(|| config.state_dir.as_ref().map(|dir| dir.join("detached")))
            .unwrap_or(defaults.detached_dir),
        state_dir: config.state_dir.unwrap_or(defaults.state_dir),
        export_dir: config.export_dir.unwrap_or(defaults.export_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `ZONEGRID_ZONES_URL`: Override record list location
/// - `ZONEGRID_PAGE_SIZE`: Override page size (ignored unless a positive integer)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(zones_url) = std::env::var("ZONEGRID_ZONES_URL") {
        config.zones_url = zones_url;
    }

    if let Some(page_size) = std::env::var("ZONEGRID_PAGE_SIZE")
        .ok()
        .and_then(|raw| raw.parse::<usize>().ok())
        .and_then(NonZeroUsize::new)
    {
        config.page_size = page_size;
    }

    config
}

/// CLI values that override every other configuration source.
///
/// Only fields the user explicitly set are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--source`
    pub zones_url: Option<String>,
    /// `--page-size`
    pub page_size: Option<NonZeroUsize>,
    /// `--sort`
    pub default_sort: Option<SortKey>,
    /// `--dark`
    pub dark_mode: Option<bool>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(zones_url) = overrides.zones_url {
        config.zones_url = zones_url;
    }

    if let Some(page_size) = overrides.page_size {
        config.page_size = page_size;
    }

    if let Some(sort) = overrides.default_sort {
        config.default_sort = sort;
    }

    if let Some(dark_mode) = overrides.dark_mode {
        config.dark_mode = dark_mode;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
