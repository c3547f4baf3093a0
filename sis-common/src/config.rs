//! Configuration loading and root folder resolution
//!
//! The root folder holds the database file and the spreadsheet exports.

use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "SIS_ROOT_FOLDER";

/// Root folder resolution priority order:
/// 1. Explicit argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(explicit: Option<&str>) -> PathBuf {
    // Priority 1: Explicit argument
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Database file inside the root folder
pub fn database_path(root_folder: &std::path::Path) -> PathBuf {
    root_folder.join("sis.db")
}

/// Directory spreadsheet exports are written to (the root folder itself)
pub fn export_dir(root_folder: &std::path::Path) -> PathBuf {
    root_folder.to_path_buf()
}

/// Get default configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir()
        .map(|d| d.join("sis").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if user_config.exists() {
        return Ok(user_config);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/sis/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("sis"))
        .unwrap_or_else(|| PathBuf::from("./sis_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_argument_wins() {
        let root = resolve_root_folder(Some("/tmp/sis-test"));
        assert_eq!(root, PathBuf::from("/tmp/sis-test"));
    }

    #[test]
    fn test_database_path_under_root() {
        let root = PathBuf::from("/tmp/sis-test");
        assert_eq!(database_path(&root), PathBuf::from("/tmp/sis-test/sis.db"));
        assert_eq!(export_dir(&root), root);
    }
}
