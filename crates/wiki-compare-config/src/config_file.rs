use std::path::{Path, PathBuf};

/// Load config file content, first match wins
///
/// [`config_search_paths`](crate::paths::config_search_paths) yields, in order:
/// 1. `.wiki-compare.toml` in the current working directory
/// 2. `.wiki-compare.toml` in the home directory
/// 3. `config.toml` in the platform config directory
///
/// Returns the path and content of the first file that can be read.
pub fn load_first(paths: &[PathBuf]) -> Option<(PathBuf, String)> {
    paths
        .iter()
        .find_map(|path| read_config(path).map(|content| (path.clone(), content)))
}

fn read_config(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some(content)
        }
        Err(_) => None,
    }
}
