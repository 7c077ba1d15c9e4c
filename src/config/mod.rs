//! Configuration module
//!
//! Loads settings from YAML files and environment variables. Settings are
//! passed explicitly to the components that need them.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "AGGREGATOR_SETTINGS_PATH";

/// Find the settings file to use, if any
pub fn locate() -> Option<PathBuf> {
    std::env::var(SETTINGS_PATH_VAR)
        .ok()
        .map(PathBuf::from)
        .into_iter()
        .chain(candidate_paths())
        .find(|path| path.exists())
}

/// Load settings from `path`, or defaults when there is none, then apply
/// environment overrides
pub fn load_from(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    Ok(settings)
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("image-aggregator/settings.yml"));
    }
    paths
}
