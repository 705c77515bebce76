use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the store when no path is configured.
pub const DEFAULT_DATABASE_FILE: &str = "races.db";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Location of the SQLite store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Path to the store file. When unset, `races.db` next to the running
    /// executable is used.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct Overrides {
    /// Address to bind the HTTP server to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<String>,

    /// Port to bind the HTTP server to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,

    /// Path to the SQLite store file.
    #[cfg_attr(feature = "clap", arg(long))]
    pub database: Option<PathBuf>,
}

impl Settings {
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(host) = &overrides.host {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(path) = &overrides.database {
            self.database.path = Some(path.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be between 1 and 65535".to_string(),
            ));
        }
        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "database.path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// The effective store path: the configured one, or `races.db` in the
    /// directory of the running executable.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => {
                let exe = std::env::current_exe()?;
                let dir = exe.parent().map(PathBuf::from).unwrap_or_default();
                Ok(dir.join(DEFAULT_DATABASE_FILE))
            }
        }
    }
}
