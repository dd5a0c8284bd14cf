//! Room state machine, the room itself, and its broadcast snapshot.

use parlor_engine::{EngineState, GameEngine, GameVariant, PlayerEntry, Roster};
use parlor_protocol::{PlayerId, RoomId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// The lifecycle state of a room.
///
/// Transitions are strictly ordered — no skipping states:
///
/// ```text
/// Waiting → Starting → InProgress → Finished
/// ```
///
/// - **Waiting**: Room exists, accepting joins. Players toggle ready.
/// - **Starting**: Start condition met, the engine is being built.
///   Transient — a room never rests here between commands.
/// - **InProgress**: Game is running. Game actions are accepted.
/// - **Finished**: Game ended, winner (if any) recorded. Players can
///   see the final state but can't act.
///
/// A room that empties out is destroyed from whatever state it was in;
/// destruction is removal from the registry, not a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Waiting,
    Starting,
    InProgress,
    Finished,
}

impl RoomStatus {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Attempts to transition to the next state.
    ///
    /// Returns `Some(next)` if the transition is valid, `None` if not.
    /// This enforces the strict ordering of the state machine.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Waiting => Some(Self::Starting),
            Self::Starting => Some(Self::InProgress),
            Self::InProgress => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "Waiting"),
            Self::Starting => write!(f, "Starting"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// One live room: its roster, its lifecycle state, and (once started)
/// its engine. Owned exclusively by the registry.
pub struct Room {
    pub(crate) id: RoomId,
    pub(crate) variant: GameVariant,
    pub(crate) status: RoomStatus,
    pub(crate) roster: Roster,
    /// Built at the Waiting→InProgress transition; kept through
    /// Finished so snapshots still carry the final game state.
    pub(crate) engine: Option<Box<dyn GameEngine>>,
    pub(crate) winner: Option<PlayerId>,
}

impl Room {
    pub(crate) fn new(id: RoomId, variant: GameVariant) -> Self {
        Self {
            id,
            variant,
            status: RoomStatus::Waiting,
            roster: Roster::new(),
            engine: None,
            winner: None,
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.roster.len() >= self.variant.capacity()
    }

    /// Builds a snapshot of the room as it stands.
    ///
    /// With a `viewer`, the engine state includes that player's private
    /// fields; without one it is the broadcast-safe view.
    pub(crate) fn snapshot(&self, viewer: Option<&PlayerId>) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id,
            variant_type: self.variant.as_str().to_string(),
            status: self.status,
            players: self.roster.entries().to_vec(),
            engine_state: self
                .engine
                .as_ref()
                .map(|e| e.state(&self.roster, viewer)),
            winner: self.winner.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomSnapshot
// ---------------------------------------------------------------------------

/// The full observable state of a room at one point in time.
///
/// Every successful registry mutation returns exactly one of these,
/// taken after the mutation; the dispatch layer publishes it verbatim.
/// A room destroyed by its last player leaving yields a final snapshot
/// with an empty player list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub variant_type: String,
    pub status: RoomStatus,
    pub players: Vec<PlayerEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_state: Option<EngineState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_status_next_follows_strict_order() {
        assert_eq!(RoomStatus::Waiting.next(), Some(RoomStatus::Starting));
        assert_eq!(RoomStatus::Starting.next(), Some(RoomStatus::InProgress));
        assert_eq!(RoomStatus::InProgress.next(), Some(RoomStatus::Finished));
        assert_eq!(RoomStatus::Finished.next(), None);
    }

    #[test]
    fn test_room_status_can_transition_to() {
        assert!(RoomStatus::Waiting.can_transition_to(RoomStatus::Starting));
        assert!(!RoomStatus::Waiting.can_transition_to(RoomStatus::InProgress));
        assert!(!RoomStatus::Finished.can_transition_to(RoomStatus::Waiting));
    }

    #[test]
    fn test_room_status_is_joinable() {
        assert!(RoomStatus::Waiting.is_joinable());
        assert!(!RoomStatus::Starting.is_joinable());
        assert!(!RoomStatus::InProgress.is_joinable());
        assert!(!RoomStatus::Finished.is_joinable());
    }

    #[test]
    fn test_room_status_display() {
        assert_eq!(RoomStatus::Waiting.to_string(), "Waiting");
        assert_eq!(RoomStatus::InProgress.to_string(), "InProgress");
    }

    #[test]
    fn test_room_status_wire_token_is_snake_case() {
        let json = serde_json::to_string(&RoomStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_snapshot_omits_absent_engine_state_and_winner() {
        let room = Room::new(RoomId(7), GameVariant::Trivia);
        let snapshot = room.snapshot(None);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["room_id"], 7);
        assert_eq!(json["variant_type"], "trivia");
        assert_eq!(json["status"], "waiting");
        assert!(json.get("engine_state").is_none());
        assert!(json.get("winner").is_none());
    }
}
