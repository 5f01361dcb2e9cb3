//! Connection target construction.
//!
//! The game server identifies clients purely by query parameters on the
//! WebSocket URL, so the endpoint is the base address with `clientType` and
//! `username` appended.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Username sent when none is configured.
pub const DEFAULT_USERNAME: &str = "python-example-client";

/// The kind of client announced to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClientType {
    /// Controls a player entity and answers every tick
    #[default]
    #[serde(rename = "PLAYER")]
    Player,
    /// Watches the game; the server ignores its actions
    #[serde(rename = "SPECTATOR")]
    Spectator,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Player => "PLAYER",
            ClientType::Spectator => "SPECTATOR",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "PLAYER" => Ok(ClientType::Player),
            "SPECTATOR" => Ok(ClientType::Spectator),
            other => Err(format!("Unknown client type: {other}")),
        }
    }
}

/// Fully realised WebSocket URL for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEndpoint {
    url: String,
    request_url: String,
    client_type: ClientType,
}

impl ConnectionEndpoint {
    /// Builds the endpoint by appending the identification query to `base_address`.
    ///
    /// The base is used verbatim apart from the root path added to the
    /// request target; no other URL normalisation happens.
    pub fn new(base_address: &str, client_type: ClientType, username: &str) -> Self {
        let url = format!("{base_address}?clientType={client_type}&username={username}");
        let request_url = with_root_path(&url);
        Self { url, request_url, client_type }
    }

    /// The endpoint exactly as built from the base address.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// What goes on the wire. Same as [`url`](Self::url) except that a base
    /// without a path gets `/`, since `GET ?query` is not a valid request target.
    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    pub fn client_type(&self) -> ClientType {
        self.client_type
    }
}

/// Inserts `/` between the authority and the query when there is no path.
fn with_root_path(url: &str) -> String {
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    let rest = &url[authority_start..];

    match rest.find(|c: char| matches!(c, '/' | '?' | '#')) {
        Some(i) if rest[i..].starts_with('/') => url.to_string(),
        Some(i) => {
            let split = authority_start + i;
            format!("{}/{}", &url[..split], &url[split..])
        }
        None => format!("{url}/"),
    }
}

impl fmt::Display for ConnectionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
