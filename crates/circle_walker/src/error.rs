//! Error types for the player client.
//!
//! Session failures fall into two families: the connection closing (an
//! expected way for a session to end) and everything else.

use tokio_tungstenite::tungstenite::{self, error::ProtocolError};

/// Enumeration of possible client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The WebSocket connection could not be established
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: tungstenite::Error,
    },

    /// The server closed the connection (or the stream ended)
    #[error("Connection closed")]
    ConnectionClosed,

    /// Transport failure while reading or writing frames
    #[error("Transport error: {0}")]
    Transport(#[from] tungstenite::Error),

    /// A server message was not valid JSON, or a reply failed to encode
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    /// A binary frame whose payload is not UTF-8
    #[error("Binary frame is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A game-state message carried no `tick` field
    #[error("Game state message has no tick: {0}")]
    MissingTick(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether this error means the peer went away rather than something
    /// actually failing.
    pub fn is_connection_closed(&self) -> bool {
        match self {
            ClientError::ConnectionClosed => true,
            ClientError::Transport(err) => matches!(
                err,
                tungstenite::Error::ConnectionClosed
                    | tungstenite::Error::AlreadyClosed
                    | tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake)
            ),
            _ => false,
        }
    }
}
