//! Runtime configuration loaded from TOML. Every field has a default so an
//! absent or partial file still yields a usable catalog.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

use crate::error::{CatalogError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LIBRARY_CATALOG_CONFIG";
/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.sqlite";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Publishers inserted on first connect if their id is not taken.
    pub publishers: Vec<PublisherSeed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            log_level: "info".to_string(),
            publishers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file. `None` means `~/.library-catalog/library.sqlite`.
    pub path: Option<PathBuf>,
    /// Use a private in-memory database instead of a file.
    pub in_memory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublisherSeed {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            CatalogError::io(
                format!("failed to read config file at {}", path.display()),
                err,
            )
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve settings from `LIBRARY_CATALOG_CONFIG`, then the per-user
    /// config file, then defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

impl DatabaseSettings {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            in_memory: false,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            in_memory: true,
        }
    }

    /// Path of the SQLite file, falling back to the user's home directory.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => default_db_path(),
        }
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(CatalogError::NoHomeDirectory)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "library-catalog")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.log_level, "info");
        assert!(settings.database.path.is_none());
        assert!(!settings.database.in_memory);
        assert!(settings.publishers.is_empty());
    }

    #[test]
    fn parses_database_and_publishers() {
        let settings = Settings::from_toml(
            r#"
            log_level = "debug"

            [database]
            path = "/var/lib/library/catalog.sqlite"

            [[publishers]]
            id = 1
            name = "Scribner"
            website = "https://www.simonandschuster.com"

            [[publishers]]
            id = 2
            name = "Vintage"
            "#,
        )
        .unwrap();

        assert_eq!(settings.log_level, "debug");
        assert_eq!(
            settings.database.resolve_path().unwrap(),
            PathBuf::from("/var/lib/library/catalog.sqlite")
        );
        assert_eq!(settings.publishers.len(), 2);
        assert_eq!(settings.publishers[1].website, None);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Settings::from_toml("[database\npath = 3").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
