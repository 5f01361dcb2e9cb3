//! Wire message types exchanged with the game server.
//!
//! All messages are JSON. The client only looks at the handful of fields it
//! needs; everything else in a game-state push is carried along as an opaque
//! [`serde_json::Value`].
//!
//! Outbound replies look like:
//!
//! ```json
//! { "tick": "9a1c5a4e-2f0b-4c55-8d3e-1b6f0f2f6a10", "action": "TURN", "degrees": 270 }
//! ```

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// First message the server sends after accepting the connection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HandshakeReply {
    /// Whether the server admitted this client. Absent means no.
    #[serde(default)]
    pub success: bool,
    /// Identifier of the player entity assigned to us
    #[serde(default)]
    pub player_id: Option<Value>,
}

impl HandshakeReply {
    pub fn from_json(payload: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// A game-state push. Only `tick` is extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct GameStateMessage {
    tick: Value,
    body: Value,
}

impl GameStateMessage {
    /// Parses a game-state push, failing if it is not JSON or lacks `tick`.
    pub fn from_json(payload: &str) -> Result<Self, ClientError> {
        let body: Value = serde_json::from_str(payload)?;
        let tick = body
            .get("tick")
            .cloned()
            .ok_or_else(|| ClientError::MissingTick(payload.to_string()))?;
        Ok(Self { tick, body })
    }

    pub fn tick(&self) -> &Value {
        &self.tick
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// A movement or combat instruction understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "UPPERCASE")]
pub enum ActionCommand {
    Up,
    Down,
    Left,
    Right,
    /// Rotate to an absolute heading
    Turn { degrees: i32 },
    /// Accepted by the server but never part of the walking routine; kept so
    /// the full action vocabulary round-trips.
    Shoot,
}

/// The client's answer to one game-state message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReply {
    /// Echo of the tick being answered
    pub tick: Value,
    #[serde(flatten)]
    pub command: ActionCommand,
}

impl ActionReply {
    pub fn new(tick: Value, command: ActionCommand) -> Self {
        Self { tick, command }
    }

    pub fn to_json(&self) -> Result<String, ClientError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handshake_success() {
        let reply = HandshakeReply::from_json(r#"{"success": true, "player_id": "abc-123"}"#).unwrap();
        assert!(reply.success);
        assert_eq!(reply.player_id, Some(json!("abc-123")));
    }

    #[test]
    fn test_handshake_missing_success_is_rejection() {
        let reply = HandshakeReply::from_json(r#"{"player_id": 7}"#).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.player_id, Some(json!(7)));
    }

    #[test]
    fn test_handshake_not_json() {
        let err = HandshakeReply::from_json("welcome!").unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[test]
    fn test_game_state_tick_is_opaque() {
        let payload = r#"{"tick": "0f5e7c1a-tick", "game_state": {"players": {}, "entities": []}}"#;
        let state = GameStateMessage::from_json(payload).unwrap();
        assert_eq!(state.tick(), &json!("0f5e7c1a-tick"));
        assert_eq!(state.body()["game_state"]["entities"], json!([]));

        let numeric = GameStateMessage::from_json(r#"{"tick": 42}"#).unwrap();
        assert_eq!(numeric.tick(), &json!(42));
    }

    #[test]
    fn test_game_state_without_tick() {
        let err = GameStateMessage::from_json(r#"{"round": 3}"#).unwrap_err();
        match err {
            ClientError::MissingTick(raw) => assert_eq!(raw, r#"{"round": 3}"#),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_action_reply_wire_shape() {
        let reply = ActionReply::new(json!("t-1"), ActionCommand::Right);
        let value: Value = serde_json::from_str(&reply.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"tick": "t-1", "action": "RIGHT"}));

        let turn = ActionReply::new(json!(5), ActionCommand::Turn { degrees: 270 });
        let value: Value = serde_json::from_str(&turn.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"tick": 5, "action": "TURN", "degrees": 270}));
    }

    #[test]
    fn test_action_reply_parses_back() {
        let parsed: ActionReply =
            serde_json::from_str(r#"{"action": "SHOOT", "tick": "abc"}"#).unwrap();
        assert_eq!(parsed.command, ActionCommand::Shoot);
        assert_eq!(parsed.tick, json!("abc"));
    }
}
