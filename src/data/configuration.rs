use std::path::Path;

use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///tmp/holocron.db?mode=rwc";

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl Configuration {
    /// Reads the TOML file at `path`, falling back to defaults when it is absent.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No configuration file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Values given on the command line or through the environment win over the file.
    pub fn apply_overrides(&mut self, port: Option<u16>, database_url: Option<String>) {
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(url) = database_url {
            self.database.url = url;
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Configuration::from_toml_str("").unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(config.server.port, 3000);
        assert!(config.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Configuration::from_toml_str(
            r#"
            [server]
            port = 8080

            [database]
            url = "postgres://localhost/holocron"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "postgres://localhost/holocron");
    }

    #[test]
    fn overrides_replace_only_supplied_values() {
        let mut config = Configuration::default();
        config.apply_overrides(Some(4000), None);
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);

        config.apply_overrides(None, Some("sqlite::memory:".to_string()));
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(Configuration::load(&path).is_err());
    }
}
