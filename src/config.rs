//! Catalog configuration.
//!
//! Stored in TOML at `~/.config/catalog-search/config.toml` (or the XDG
//! equivalent). Every key is optional:
//!
//! ```toml
//! data_root = "https://example.org/catalogo"
//! search_page = "menubusca.html"
//! detail_page = "detalhe.html"
//! ```
//!
//! Environment variables override the file: `CATALOG_DATA_ROOT`,
//! `CATALOG_SEARCH_PAGE`, `CATALOG_DETAIL_PAGE`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::store::DataRoot;
use crate::ui::links::{DEFAULT_DETAIL_PAGE, DEFAULT_SEARCH_PAGE};

pub const ENV_DATA_ROOT: &str = "CATALOG_DATA_ROOT";
pub const ENV_SEARCH_PAGE: &str = "CATALOG_SEARCH_PAGE";
pub const ENV_DETAIL_PAGE: &str = "CATALOG_DETAIL_PAGE";

const DEFAULT_DATA_ROOT: &str = "data";

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory or http(s) base URL holding `patentes/` and `laboratorios/`.
    pub data_root: String,
    /// Page that receives free-text searches (`?q=`).
    pub search_page: String,
    /// Page that shows one record (`?id=`).
    pub detail_page: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_root: DEFAULT_DATA_ROOT.to_string(),
            search_page: DEFAULT_SEARCH_PAGE.to_string(),
            detail_page: DEFAULT_DETAIL_PAGE.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load from `path` (defaults when missing), then apply environment
    /// overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file path.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(xdg_config) = dotenvy::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config)
                .join("catalog-search")
                .join("config.toml"));
        }

        dirs::config_dir()
            .map(|p| p.join("catalog-search").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = dotenvy::var(ENV_DATA_ROOT) {
            self.data_root = v;
        }
        if let Ok(v) = dotenvy::var(ENV_SEARCH_PAGE) {
            self.search_page = v;
        }
        if let Ok(v) = dotenvy::var(ENV_DETAIL_PAGE) {
            self.detail_page = v;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("data_root", &self.data_root),
            ("search_page", &self.search_page),
            ("detail_page", &self.detail_page),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{name} cannot be empty")));
            }
        }
        Ok(())
    }

    pub fn data_root(&self) -> DataRoot {
        DataRoot::parse(&self.data_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    struct EnvGuard {
        key: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, val: &str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe { std::env::set_var(key, val) };
            Self { key, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.prev {
                Some(v) => unsafe { std::env::set_var(self.key, v) },
                None => unsafe { std::env::remove_var(self.key) },
            }
        }
    }

    #[test]
    #[serial]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.data_root(), DataRoot::Dir(PathBuf::from("data")));
    }

    #[test]
    #[serial]
    fn file_values_and_partial_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_root = \"https://example.org/cat/\"\n").unwrap();
        let config = CatalogConfig::load_from(&path).unwrap();
        assert_eq!(
            config.data_root(),
            DataRoot::BaseUrl("https://example.org/cat".into())
        );
        assert_eq!(config.detail_page, DEFAULT_DETAIL_PAGE);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search_page = \"busca.html\"\n").unwrap();
        let _guard = EnvGuard::set(ENV_SEARCH_PAGE, "outra.html");
        let config = CatalogConfig::load_from(&path).unwrap();
        assert_eq!(config.search_page, "outra.html");
    }

    #[test]
    #[serial]
    fn empty_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "detail_page = \"  \"\n").unwrap();
        let err = CatalogConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    #[serial]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_root = [").unwrap();
        let err = CatalogConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
