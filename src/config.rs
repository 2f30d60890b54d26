//!
//! This module defines the configuration structures and loading logic for chatmark.
//! Configuration lives in a `.chatmark.toml` file, discovered from the working
//! directory upwards unless a path is given explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name looked up during configuration discovery
pub const CONFIG_FILE_NAME: &str = ".chatmark.toml";

/// How markdown is presented in rendered messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreference {
    /// Markdown is not applied at all
    None,
    /// Markdown is applied and the delimiters stay visible
    WithChars,
    /// Markdown is applied and the delimiters are removed
    #[default]
    WithoutChars,
}

impl fmt::Display for StylePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StylePreference::None => write!(f, "none"),
            StylePreference::WithChars => write!(f, "with-chars"),
            StylePreference::WithoutChars => write!(f, "without-chars"),
        }
    }
}

impl FromStr for StylePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "none" | "off" | "plain" => Ok(StylePreference::None),
            "with-chars" | "with-symbols" => Ok(StylePreference::WithChars),
            "without-chars" | "without-symbols" => Ok(StylePreference::WithoutChars),
            _ => Err(format!("Unknown style preference: {s}")),
        }
    }
}

impl StylePreference {
    /// The `show_formatting_symbols` argument for markdown, or `None` when
    /// markdown is disabled
    pub fn show_formatting_symbols(self) -> Option<bool> {
        match self {
            StylePreference::None => None,
            StylePreference::WithChars => Some(true),
            StylePreference::WithoutChars => Some(false),
        }
    }
}

/// Settings for the message renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderConfig {
    /// Markdown style preference
    pub style: StylePreference,
    /// Wrap bare links in anchors
    pub highlight_urls: bool,
    /// Escape HTML special characters before formatting
    pub escape_html: bool,
    /// Mark lines starting with `>` as quotes
    pub detect_quotes: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: StylePreference::default(),
            highlight_urls: true,
            escape_html: true,
            detect_quotes: true,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderConfig,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Failed to serialize the configuration
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
}

/// Configuration together with the file it came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcedConfig {
    pub config: Config,
    /// `None` when built-in defaults are in effect
    pub loaded_file: Option<PathBuf>,
}

impl From<SourcedConfig> for Config {
    fn from(sourced: SourcedConfig) -> Self {
        sourced.config
    }
}

impl Config {
    /// Parse configuration from TOML text; `origin` is only used in error messages
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("{origin}: Failed to parse TOML: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            source: e,
            path: path_str.clone(),
        })?;
        Self::from_toml_str(&content, &path_str)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}

impl SourcedConfig {
    /// Load configuration, discovering it from the current working directory
    pub fn load_with_discovery(config_path: Option<&str>, skip_auto_discovery: bool) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::IoError {
            source: e,
            path: ".".to_string(),
        })?;
        Self::load_with_discovery_from(config_path, skip_auto_discovery, &cwd)
    }

    /// Load configuration with discovery starting at `start_dir`.
    ///
    /// An explicit `config_path` always wins and must exist. Otherwise the
    /// nearest `.chatmark.toml` in `start_dir` or its ancestors is used, unless
    /// discovery is skipped, in which case built-in defaults apply.
    pub fn load_with_discovery_from(
        config_path: Option<&str>,
        skip_auto_discovery: bool,
        start_dir: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            log::debug!("[chatmark-config] Explicit config_path provided: {path}");
            let path = PathBuf::from(path);
            let config = Config::from_file(&path)?;
            return Ok(Self {
                config,
                loaded_file: Some(path),
            });
        }

        if skip_auto_discovery {
            log::debug!("[chatmark-config] Skipping auto-discovery due to --no-config flag");
            return Ok(Self::default());
        }

        match discover_config_file(start_dir) {
            Some(path) => {
                log::debug!("[chatmark-config] Loading discovered config file: {}", path.display());
                let config = Config::from_file(&path)?;
                Ok(Self {
                    config,
                    loaded_file: Some(path),
                })
            }
            None => {
                log::debug!("[chatmark-config] No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Find the nearest configuration file in `start_dir` or any of its ancestors
pub fn discover_config_file(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
