// src/infrastructure/config.rs
use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_DATABASE_PATH};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration for the flashcard service
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub cors: bool,
    /// Directory with the API documentation UI, served at `/swagger-ui`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_bind() -> String { DEFAULT_BIND_ADDR.to_string() }
fn default_database_path() -> PathBuf { PathBuf::from(DEFAULT_DATABASE_PATH) }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors: false,
            docs_dir: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind))
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Explicit path if given, else the per-user config file if present, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from user config directory");
                Self::load(path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// `<config_dir>/flashcards/config.toml`, e.g. `~/.config/flashcards/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flashcards").join("config.toml"))
}
