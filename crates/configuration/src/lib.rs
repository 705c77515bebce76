use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DEFAULT_DATABASE_FILE, DatabaseSettings, Overrides, ServerSettings, Settings};

/// Prefix of the environment variables read by `load_settings`,
/// e.g. `RACELOG__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "RACELOG";

/// Loads the application settings.
///
/// Sources, lowest priority first: built-in defaults, a TOML file, then
/// `RACELOG__*` environment variables. Without an explicit `config_file` an
/// optional `config.toml` in the working directory is used; an explicit file
/// must exist.
pub fn load_settings(config_file: Option<&Path>) -> Result<Settings, ConfigError> {
    build_settings(config_file, None)
}

fn build_settings(
    config_file: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Settings, ConfigError> {
    let file = match config_file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Reading configuration file.");
            config::File::from(path).required(true)
        }
        None => config::File::with_name("config").required(false),
    };

    let builder = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Settings::default())?)
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("racelog.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\n\n[database]\npath = \"/var/lib/racelog/races.db\"\n",
        )
        .unwrap();

        let settings = build_settings(Some(&path), Some(config::Map::new())).unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(
            settings.database.path,
            Some(PathBuf::from("/var/lib/racelog/races.db"))
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("racelog.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let mut env = config::Map::new();
        env.insert("RACELOG__SERVER__PORT".to_string(), "8081".to_string());
        env.insert("RACELOG__DATABASE__PATH".to_string(), "/tmp/env.db".to_string());

        let settings = build_settings(Some(&path), Some(env)).unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.database.path, Some(PathBuf::from("/tmp/env.db")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = build_settings(Some(&path), Some(config::Map::new())).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut env = config::Map::new();
        env.insert("RACELOG__SERVER__PORT".to_string(), "0".to_string());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("racelog.toml");
        std::fs::write(&path, "").unwrap();

        let err = build_settings(Some(&path), Some(env)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
