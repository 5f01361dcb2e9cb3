//! A single game session: connect, handshake, then answer every game-state
//! push with the next command of the routine.
//!
//! The session is strictly sequential. Each iteration receives one message,
//! sends one reply, then sleeps for the pacing delay before reading again.

use crate::endpoint::{ClientType, ConnectionEndpoint};
use crate::error::ClientError;
use crate::protocol::{ActionReply, GameStateMessage, HandshakeReply};
use crate::routine::CycleCounter;
use futures::{Sink, SinkExt, Stream, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info};

/// Pause after each reply unless configured otherwise.
pub const DEFAULT_PACE: Duration = Duration::from_millis(200);

/// Stream type produced by [`GameClient::connect`].
pub type ClientStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How a session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// The handshake reported `success: false`
    Rejected,
    /// The server closed the connection
    Closed,
    /// Anything else went wrong; the session stopped at the first failure
    Failed(ClientError),
}

/// Scripted player client bound to one WebSocket connection.
pub struct GameClient<S> {
    stream: S,
    client_type: ClientType,
    pace: Duration,
    counter: CycleCounter,
    player_id: Option<Value>,
    states_received: u64,
    replies_sent: u64,
}

impl GameClient<ClientStream> {
    /// Opens the WebSocket connection. No retries.
    pub async fn connect(endpoint: &ConnectionEndpoint, pace: Duration) -> Result<Self, ClientError> {
        info!("🔌 Connecting to {}", endpoint);

        let (stream, response) = connect_async(endpoint.request_url())
            .await
            .map_err(|source| ClientError::Connect {
                endpoint: endpoint.to_string(),
                source,
            })?;

        debug!("Upgrade response status: {}", response.status());
        info!("✅ WebSocket client connected");

        Ok(Self::from_stream(stream, endpoint.client_type(), pace))
    }
}

impl<S> GameClient<S>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Sink<Message, Error = tungstenite::Error> + Unpin,
{
    /// Wraps an already established WebSocket stream.
    pub fn from_stream(stream: S, client_type: ClientType, pace: Duration) -> Self {
        Self {
            stream,
            client_type,
            pace,
            counter: CycleCounter::new(),
            player_id: None,
            states_received: 0,
            replies_sent: 0,
        }
    }

    /// Player identifier assigned during the handshake, if it succeeded.
    pub fn player_id(&self) -> Option<&Value> {
        self.player_id.as_ref()
    }

    pub fn states_received(&self) -> u64 {
        self.states_received
    }

    /// Replies written to the socket. Counted at send time, so a reply is
    /// included even if the pacing pause after it never finished.
    pub fn replies_sent(&self) -> u64 {
        self.replies_sent
    }

    /// Runs the handshake and the game loop until the session ends, then
    /// closes the connection.
    ///
    /// Never returns an error: both failure kinds are logged and reported
    /// through [`SessionEnd`].
    pub async fn run(&mut self) -> SessionEnd {
        let end = match self.drive().await {
            Ok(end) => end,
            Err(err) if err.is_connection_closed() => {
                info!("🔌 Connection closed: {}", err);
                SessionEnd::Closed
            }
            Err(err) => {
                error!("❌ Connection error: {}", err);
                SessionEnd::Failed(err)
            }
        };

        self.close().await;
        end
    }

    /// Sends a close frame. Errors are irrelevant at this point and only
    /// logged at debug level.
    pub async fn close(&mut self) {
        if let Err(e) = self.stream.close().await {
            debug!("Close after session end: {}", e);
        }
    }

    async fn drive(&mut self) -> Result<SessionEnd, ClientError> {
        let handshake = self.handshake().await?;
        if !handshake.success {
            info!("🚫 Connection unsuccessful. Exiting.");
            return Ok(SessionEnd::Rejected);
        }

        match &handshake.player_id {
            Some(id) => info!("🎮 Connected successfully. Player ID: {}", id),
            None => info!("🎮 Connected successfully without a player ID"),
        }
        self.player_id = handshake.player_id;

        loop {
            self.step().await?;
        }
    }

    /// Reads the one-off handshake message that follows the upgrade.
    pub async fn handshake(&mut self) -> Result<HandshakeReply, ClientError> {
        let payload = self.next_payload().await?;
        info!("📨 Initial connection message: {}", payload);
        HandshakeReply::from_json(&payload)
    }

    /// Handles exactly one game-state message.
    async fn step(&mut self) -> Result<(), ClientError> {
        let payload = self.next_payload().await?;
        let state = GameStateMessage::from_json(&payload)?;
        self.states_received += 1;
        debug!("Received new game state:\n{:#}", state.body());

        if self.client_type == ClientType::Spectator {
            info!("👀 Observed tick {}", state.tick());
            return Ok(());
        }

        let reply = ActionReply::new(state.tick().clone(), self.counter.current());
        let json = reply.to_json()?;
        info!("📤 Sending message #{}: {}", self.replies_sent + 1, json);
        self.stream.send(Message::text(json)).await?;
        self.replies_sent += 1;

        sleep(self.pace).await;
        self.counter.advance();
        Ok(())
    }

    /// Next data frame as text. Control frames are skipped; a close frame or
    /// the end of the stream surfaces as [`ClientError::ConnectionClosed`].
    async fn next_payload(&mut self) -> Result<String, ClientError> {
        loop {
            let message = match self.stream.next().await {
                Some(message) => message?,
                None => return Err(ClientError::ConnectionClosed),
            };

            match message {
                Message::Text(text) => return Ok(text.as_str().to_owned()),
                Message::Binary(bin) => return Ok(std::str::from_utf8(&bin)?.to_owned()),
                Message::Close(frame) => {
                    debug!("Close frame from server: {:?}", frame);
                    return Err(ClientError::ConnectionClosed);
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            }
        }
    }
}
