//! Platform-specific paths for settings and batch plans.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/linout/` (Linux), `~/Library/Application Support/linout/` (macOS), `%APPDATA%\linout\` (Windows)
//! - **Settings file**: `<user config>/config.toml`
//! - **Saved plans**: `<user config>/plans/*.toml`

use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "linout";

/// Settings file name inside the user config directory.
const SETTINGS_FILE: &str = "config.toml";

/// Subdirectory name for saved batch plans.
const PLANS_SUBDIR: &str = "plans";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the default settings file.
pub fn default_settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Directory holding saved batch plans.
pub fn user_plans_dir() -> PathBuf {
    user_config_dir().join(PLANS_SUBDIR)
}

/// Ensure the user config directory exists.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// Find a plan file by path or by name.
///
/// `name` is tried as a path first, then as `<name>.toml` in the plans directory.
pub fn find_plan(name: &str) -> Option<PathBuf> {
    find_plan_in(name, &user_plans_dir())
}

fn find_plan_in(name: &str, plans_dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{}.toml", name)
    };

    let saved = plans_dir.join(filename);
    saved.is_file().then_some(saved)
}

/// List saved plan files, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_plans() -> Vec<PathBuf> {
    list_toml_in_dir(&user_plans_dir())
}

fn list_toml_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    files
}
