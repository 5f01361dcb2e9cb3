//! Application lifecycle: one connection, one session, then exit.

use crate::config::AppConfig;
use crate::endpoint::ConnectionEndpoint;
use crate::session::{GameClient, SessionEnd};
use crate::signals::wait_for_interrupt;
use tracing::{info, warn};

/// Ties the validated configuration to a single game session.
pub struct Application {
    config: AppConfig,
    endpoint: ConnectionEndpoint,
}

impl Application {
    pub fn new(address: &str, config: AppConfig) -> Self {
        let endpoint = ConnectionEndpoint::new(
            address,
            config.client.client_type,
            &config.client.username,
        );
        Self { config, endpoint }
    }

    pub fn endpoint(&self) -> &ConnectionEndpoint {
        &self.endpoint
    }

    /// Connects and runs the session to its end.
    ///
    /// Only a failed connect is returned as an error. Whatever happens after
    /// the connection is up has already been logged by the session and
    /// counts as a normal exit.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        info!("🚀 Starting client. Connecting to {}", self.endpoint);
        info!(
            "  👤 {} as {} | ⏱️ {}ms pacing",
            self.config.client.username,
            self.endpoint.client_type(),
            self.config.client.pace_ms
        );

        let mut client = GameClient::connect(&self.endpoint, self.config.client.pace()).await?;

        let interrupted = async {
            if let Err(e) = wait_for_interrupt().await {
                warn!("Interrupt handling unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        };

        let end = tokio::select! {
            end = client.run() => Some(end),
            _ = interrupted => None,
        };

        match end {
            Some(SessionEnd::Rejected) => info!("🛑 Server rejected the session"),
            Some(SessionEnd::Closed) => info!("🛑 Session ended by server"),
            Some(SessionEnd::Failed(_)) => info!("🛑 Session ended after an error"),
            None => {
                info!("📡 Received interrupt - closing connection");
                client.close().await;
            }
        }

        info!(
            "📊 Final stats: received {} game states, sent {} actions",
            client.states_received(),
            client.replies_sent()
        );

        Ok(())
    }
}
