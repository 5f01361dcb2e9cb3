//! Configuration management for the player client.
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags. Without a file the defaults reproduce the classic
//! example client: PLAYER, `python-example-client`, 200 ms pacing.

use crate::cli::CliArgs;
use crate::endpoint::{ClientType, DEFAULT_USERNAME};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_pace_ms() -> u64 {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How the client identifies itself and paces its replies
    #[serde(default)]
    pub client: ClientSettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Client identity and pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Username sent in the connection query
    #[serde(default = "default_username")]
    pub username: String,
    /// PLAYER or SPECTATOR
    #[serde(default)]
    pub client_type: ClientType,
    /// Pause after each reply in milliseconds
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            username: default_username(),
            client_type: ClientType::default(),
            pace_ms: default_pace_ms(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl ClientSettings {
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration there and
    /// returns it.
    pub async fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(username) = &args.username {
            self.client.username = username.clone();
        }

        if args.spectator {
            self.client.client_type = ClientType::Spectator;
        }

        if let Some(pace_ms) = args.pace_ms {
            self.client.pace_ms = pace_ms;
        }

        if let Some(log_level) = &args.log_level {
            self.logging.level = log_level.clone();
        }

        if args.json_logs {
            self.logging.json_format = true;
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), String> {
        let username = &self.client.username;
        if username.is_empty() {
            return Err("Username cannot be empty".to_string());
        }

        // Goes into the query string unescaped.
        if let Some(bad) = username.chars().find(|c| c.is_whitespace() || matches!(c, '&' | '?' | '#' | '=')) {
            return Err(format!("Username contains invalid character {bad:?}: {username}"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};
    use tokio::fs;

    fn cli(address: &str) -> CliArgs {
        CliArgs {
            address: address.to_string(),
            config_path: None,
            username: None,
            spectator: false,
            log_level: None,
            json_logs: false,
            pace_ms: None,
        }
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.client.username, "python-example-client");
        assert_eq!(config.client.client_type, ClientType::Player);
        assert_eq!(config.client.pace_ms, 200);
        assert_eq!(config.client.pace(), Duration::from_millis(200));

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_from_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("walker.toml");

        let config = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config, AppConfig::default());

        // Should create the file, and it should load back identically
        assert!(path.exists());
        let reloaded = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(reloaded, config);
    }

    #[tokio::test]
    async fn test_load_from_existing_file() {
        let toml_content = r#"
[client]
username = "rust-walker"
client_type = "SPECTATOR"
pace_ms = 50

[logging]
level = "debug"
json_format = true
"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), toml_content).await.unwrap();

        let config = AppConfig::load_from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.client.username, "rust-walker");
        assert_eq!(config.client.client_type, ClientType::Spectator);
        assert_eq!(config.client.pace_ms, 50);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[logging]\nlevel = \"warn\"\n").await.unwrap();

        let config = AppConfig::load_from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.client, ClientSettings::default());
    }

    #[tokio::test]
    async fn test_invalid_toml_is_error() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[client\nusername = 3").await.unwrap();

        assert!(AppConfig::load_from_file(temp_file.path()).await.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();
        let mut args = cli("ws://localhost:8080");
        args.username = Some("override".to_string());
        args.spectator = true;
        args.pace_ms = Some(0);
        args.log_level = Some("trace".to_string());
        args.json_logs = true;

        config.apply_cli_overrides(&args);

        assert_eq!(config.client.username, "override");
        assert_eq!(config.client.client_type, ClientType::Spectator);
        assert_eq!(config.client.pace(), Duration::ZERO);
        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_no_overrides_keeps_file_values() {
        let mut config = AppConfig::default();
        config.client.username = "from-file".to_string();
        config.apply_cli_overrides(&cli("ws://h"));

        assert_eq!(config.client.username, "from-file");
        assert_eq!(config.client.client_type, ClientType::Player);
    }

    #[test]
    fn test_validation_invalid_username() {
        let mut config = AppConfig::default();

        config.client.username = String::new();
        assert!(config.validate().is_err());

        config.client.username = "two words".to_string();
        assert!(config.validate().is_err());

        config.client.username = "a&clientType=SPECTATOR".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_log_levels() {
        let mut config = AppConfig::default();
        for level in ["trace", "debug", "info", "warn", "error"] {
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "level {level} should be valid");
        }

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }
}
