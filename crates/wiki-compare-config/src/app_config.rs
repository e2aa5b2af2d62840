//! Application configuration
//!
//! Configuration loaded from `.wiki-compare.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use wiki_diff::ColorScheme;

/// How the CLI prints extracted diffs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable rendering
    #[default]
    Text,
    /// Serialized diff blocks
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Application configuration loaded from `.wiki-compare.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Colour table used for text output
    #[serde(default)]
    pub color_scheme: ColorScheme,

    /// Output format for the `diff` command
    #[serde(default)]
    pub output: OutputFormat,

    /// Print the "Line N:" header above each block
    #[serde(default = "default_show_line_hints")]
    pub show_line_hints: bool,

    /// Message printed when the revisions are identical
    #[serde(default = "default_no_diff_message")]
    pub no_diff_message: String,
}

fn default_show_line_hints() -> bool {
    true
}

fn default_no_diff_message() -> String {
    "No differences".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::default(),
            output: OutputFormat::default(),
            show_line_hints: default_show_line_hints(),
            no_diff_message: default_no_diff_message(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, then the platform
    /// config directory, or use defaults
    pub fn load() -> Self {
        Self::load_from(&crate::paths::config_search_paths())
    }

    /// Load config from the first existing file in `paths`
    ///
    /// A file that fails to parse is not skipped: the defaults are used.
    pub fn load_from(paths: &[PathBuf]) -> Self {
        if let Some((path, content)) = crate::config_file::load_first(paths) {
            match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
