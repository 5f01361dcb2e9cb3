//! # circle_walker - scripted player client
//!
//! Demonstration client for the multiplayer game server. It connects over
//! WebSocket, waits for the server's handshake, then answers every game-state
//! push with the next step of a fixed walking routine.
//!
//! ## Quick Start
//!
//! ```bash
//! # Walk the routine against a local server
//! circle_walker ws://localhost:8080
//!
//! # Custom name, faster pacing, JSON logs
//! circle_walker ws://localhost:8080 --username walker-2 --pace-ms 50 --json-logs
//!
//! # Settings from a file (created with defaults if missing)
//! circle_walker ws://localhost:8080 --config walker.toml
//! ```
//!
//! ## Exit Codes
//!
//! * **0**: the session ran and ended (rejected, closed, or failed mid-game)
//! * **1**: missing address, invalid configuration, or connect failure

use tracing::error;

pub mod app;
pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod routine;
pub mod session;
pub mod signals;

pub use app::Application;
pub use cli::CliArgs;
pub use config::AppConfig;
pub use endpoint::{ClientType, ConnectionEndpoint};
pub use error::ClientError;
pub use protocol::{ActionCommand, ActionReply, GameStateMessage, HandshakeReply};
pub use routine::{CycleCounter, FIXED_ROUTINE};
pub use session::{GameClient, SessionEnd};

/// Builds the effective configuration: file (if any), then CLI overrides,
/// then validation.
pub async fn resolve_config(args: &CliArgs) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config_path {
        Some(path) => AppConfig::load_from_file(path).await?,
        None => AppConfig::default(),
    };

    config.apply_cli_overrides(args);

    if let Err(e) = config.validate() {
        return Err(ClientError::Config(e).into());
    }

    Ok(config)
}

/// Entry point used by the binary.
///
/// Exits the process with status 1 on usage, configuration, logging or
/// connect failures.
pub async fn init() {
    let args = CliArgs::parse();

    let config = match resolve_config(&args).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::setup_logging(&config.logging) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = Application::new(&args.address, config).run().await {
        error!("❌ {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_resolve_config_without_file() {
        let args = CliArgs::try_parse_from(["circle_walker", "ws://host:1234"]).unwrap();
        let config = resolve_config(&args).await.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_resolve_config_file_then_cli() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("walker.toml");
        tokio::fs::write(&path, "[client]\nusername = \"from-file\"\npace_ms = 10\n")
            .await
            .unwrap();

        let args = CliArgs::try_parse_from([
            "circle_walker",
            "ws://host:1234",
            "--config",
            path.to_str().unwrap(),
            "--pace-ms",
            "0",
        ])
        .unwrap();

        let config = resolve_config(&args).await.unwrap();
        assert_eq!(config.client.username, "from-file");
        assert_eq!(config.client.pace_ms, 0);
    }

    #[tokio::test]
    async fn test_resolve_config_rejects_invalid() {
        let args = CliArgs::try_parse_from(["circle_walker", "ws://h", "--log-level", "loud"]).unwrap();
        let err = resolve_config(&args).await.unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Invalid log level"));
    }
}
