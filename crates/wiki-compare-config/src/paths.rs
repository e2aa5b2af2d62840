//! Configuration paths
//!
//! Uses platform directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/wiki-compare/`
//! - macOS: `~/Library/Application Support/wiki-compare/`
//! - Windows: `%APPDATA%\wiki-compare\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "wiki-compare";

/// Config file name looked up in the working and home directories
pub const CONFIG_FILE: &str = ".wiki-compare.toml";

/// Get the application config directory, without creating it
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to app config file in the config directory
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get path to the config file in the current working directory
pub fn local_config_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(CONFIG_FILE))
}

/// Get path to the config file in the home directory
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

/// Candidate config files, highest precedence first
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(local) = local_config_path() {
        paths.push(local);
    }
    if let Some(home) = home_config_path() {
        paths.push(home);
    }
    if let Ok(global) = app_config_path() {
        paths.push(global);
    }
    paths
}
