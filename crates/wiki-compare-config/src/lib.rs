//! Configuration for wiki-compare
//!
//! This crate provides:
//! - Config file paths (working directory, home, platform config dir)
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, OutputFormat};
pub use config_file::load_first;
pub use paths::{app_config_path, config_dir, config_search_paths};
