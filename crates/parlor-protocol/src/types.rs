//! Core protocol types: identities, bus channel names, and the inbound
//! command set.
//!
//! Everything here travels "on the wire" — these are the structures the
//! gateway serializes onto the command channel and the coordinator
//! decodes on the other side.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Bus channels
// ---------------------------------------------------------------------------

/// Channel the gateway publishes commands on. One channel, one type tag
/// per command — delivery order within the channel is preserved by the
/// bus, which is all the coordinator needs.
pub const COMMAND_CHANNEL: &str = "game_commands";

/// Channel the coordinator publishes room snapshots on.
pub const STATE_CHANNEL: &str = "game_states";

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// Player ids are minted by the gateway and opaque to the coordinator —
/// we never parse or interpret them, only compare and hash.
///
/// `#[serde(transparent)]` serializes this as the bare string, so a
/// `PlayerId("p1")` is just `"p1"` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Creates a player id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A unique identifier for a room (one game session).
///
/// Room ids are minted by the registry from a process-wide counter,
/// so they're plain numbers on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Command — the inbound message set
// ---------------------------------------------------------------------------

/// A command from the gateway, decoded off the command channel.
///
/// `#[serde(tag = "type", rename_all = "snake_case")]` produces
/// internally tagged JSON:
///   `{ "type": "create", "player_id": "p1", ... }`
/// An unknown `type` tag or a missing required field fails to decode,
/// and the dispatch adapter drops the message with a logged warning.
///
/// `Action` carries its payload as raw JSON — only the game variant
/// knows what shape it should be, so validation happens in the engine
/// (rejections surface as `InvalidPayload`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Create a room of the given variant; the creator joins immediately.
    Create {
        player_id: PlayerId,
        player_name: String,
        variant_type: String,
    },

    /// Join an existing room.
    Join {
        room_id: RoomId,
        player_id: PlayerId,
        player_name: String,
    },

    /// Leave whatever room the player is in.
    Leave { player_id: PlayerId },

    /// Flip the player's ready flag.
    Ready {
        player_id: PlayerId,
        room_id: RoomId,
        ready: bool,
    },

    /// An in-game action. `action` is the variant-specific verb
    /// ("answer", "move", "choose"); `payload` is the verb's arguments.
    Action {
        room_id: RoomId,
        player_id: PlayerId,
        action: String,
        payload: Value,
    },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The gateway contract defines exact JSON shapes for commands.
    //! These tests pin them down — a mismatch means the gateway's
    //! messages silently stop routing.

    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&PlayerId::new("p1")).unwrap();
        assert_eq!(json, "\"p1\"");
    }

    #[test]
    fn test_room_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&RoomId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_room_id_display() {
        assert_eq!(RoomId(3).to_string(), "R-3");
    }

    #[test]
    fn test_create_command_json_format() {
        let cmd = Command::Create {
            player_id: PlayerId::new("p1"),
            player_name: "Alice".into(),
            variant_type: "trivia".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "create");
        assert_eq!(json["player_id"], "p1");
        assert_eq!(json["player_name"], "Alice");
        assert_eq!(json["variant_type"], "trivia");
    }

    #[test]
    fn test_join_command_round_trip() {
        let cmd = Command::Join {
            room_id: RoomId(4),
            player_id: PlayerId::new("p2"),
            player_name: "Bob".into(),
        };
        let bytes = serde_json::to_vec(&cmd).unwrap();
        let decoded: Command = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(cmd, decoded);
    }

    #[test]
    fn test_ready_command_json_format() {
        let cmd = Command::Ready {
            player_id: PlayerId::new("p1"),
            room_id: RoomId(1),
            ready: true,
        };
        let json: serde_json::Value = serde_json::to_value(&cmd).unwrap();

        assert_eq!(json["type"], "ready");
        assert_eq!(json["room_id"], 1);
        assert_eq!(json["ready"], true);
    }

    #[test]
    fn test_action_command_carries_raw_payload() {
        let json = r#"{
            "type": "action",
            "room_id": 2,
            "player_id": "p1",
            "action": "answer",
            "payload": { "answer": "Paris" }
        }"#;
        let cmd: Command = serde_json::from_str(json).unwrap();

        match cmd {
            Command::Action { action, payload, .. } => {
                assert_eq!(action, "answer");
                assert_eq!(payload["answer"], "Paris");
            }
            other => panic!("expected action command, got {other:?}"),
        }
    }

    #[test]
    fn test_leave_command_round_trip() {
        let cmd = Command::Leave {
            player_id: PlayerId::new("p9"),
        };
        let bytes = serde_json::to_vec(&cmd).unwrap();
        let decoded: Command = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(cmd, decoded);
    }

    #[test]
    fn test_decode_unknown_command_type_returns_error() {
        let unknown = r#"{"type": "teleport", "player_id": "p1"}"#;
        let result: Result<Command, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_missing_required_field_returns_error() {
        // A join without a room_id must not decode.
        let missing = r#"{"type": "join", "player_id": "p1", "player_name": "A"}"#;
        let result: Result<Command, _> = serde_json::from_str(missing);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        let garbage = b"not json at all";
        let result: Result<Command, _> = serde_json::from_slice(garbage);
        assert!(result.is_err());
    }
}
