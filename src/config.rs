//! Configuration module
//!
//! Reads `config.toml` (default: `~/.config/ski-station/config.toml`).
//! Every field has a default, so a partial or missing file still yields a
//! usable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::infrastructure::DatabaseConfig;
use crate::shared::errors::InfraError;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "SKI_STATION_CONFIG";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

/// `[database]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// "sqlite" or "memory"
    pub backend: String,
    /// SQLite file path, used when `url` is not set
    pub path: String,
    /// Full connection URL, takes precedence over `path`
    pub url: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            path: "./ski-station.db".to_string(),
            url: None,
        }
    }
}

impl DatabaseSection {
    pub fn is_memory(&self) -> bool {
        self.backend == "memory"
    }

    /// SeaORM connection URL for the sqlite backend
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => DatabaseConfig::sqlite(&self.path).url,
        }
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.connection_url(),
            max_connections: None,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// EnvFilter directive, e.g. "info" or "ski_station=debug"
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LoggingSection {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml(&raw)?;
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        let cfg: AppConfig = toml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), InfraError> {
        match self.database.backend.as_str() {
            "sqlite" | "memory" => {}
            other => {
                return Err(InfraError::Config(format!(
                    "Unknown database backend '{}', expected 'sqlite' or 'memory'",
                    other
                )))
            }
        }

        if self.database.backend == "sqlite"
            && self.database.url.is_none()
            && self.database.path.trim().is_empty()
        {
            return Err(InfraError::Config(
                "database.path must not be empty".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(InfraError::Config(format!(
                "Unknown log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// `<config dir>/ski-station/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("ski-station").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// `SKI_STATION_CONFIG` if set, otherwise [`default_config_path`]
pub fn resolve_config_path() -> PathBuf {
    std::env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.database.backend, "sqlite");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert!(cfg.logging.is_json());
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.database, DatabaseSection::default());
    }

    #[test]
    fn url_overrides_path() {
        let cfg = AppConfig::from_toml(
            r#"
            [database]
            path = "/var/lib/ski.db"
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.database.connection_url(), "sqlite::memory:");

        let by_path = DatabaseSection {
            path: "/var/lib/ski.db".into(),
            ..Default::default()
        };
        assert_eq!(
            by_path.connection_url(),
            "sqlite:///var/lib/ski.db?mode=rwc"
        );
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [database]
            backend = "postgres"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.logging.format = "xml".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn log_format_is_case_sensitive() {
        let mut cfg = AppConfig::default();
        cfg.logging.format = "JSON".into();
        assert!(!cfg.logging.is_json());
        assert!(cfg.validate().is_err());

        cfg.logging.format = "json".into();
        assert!(cfg.logging.is_json());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[database\nbackend = ").unwrap_err();
        assert!(matches!(err, InfraError::ConfigParse(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nbackend = \"memory\"").unwrap();

        let cfg = AppConfig::load(file.path()).unwrap();
        assert!(cfg.database.is_memory());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, InfraError::Io(_)));
    }

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("config.toml"));
    }
}
