//! The session registry: creates, tracks, and routes players to rooms.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parlor_engine::{build_engine, EngineSettings, GameVariant};
use parlor_protocol::{PlayerId, RoomId};
use serde_json::Value;

use crate::room::{Room, RoomSnapshot, RoomStatus};
use crate::RegistryError;

/// Counter for generating unique room IDs.
static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(1);

/// Owns all active rooms and tracks which player is in which room.
///
/// This is the entry point for room operations from the dispatch layer.
/// Every mutating method returns the post-mutation [`RoomSnapshot`] of
/// the affected room, so the caller always has exactly one snapshot to
/// broadcast per successful command. A failed command returns an error
/// and mutates nothing.
pub struct SessionRegistry {
    /// Active rooms, keyed by room ID.
    rooms: HashMap<RoomId, Room>,

    /// Maps each player to the room they're currently in.
    /// A player can be in at most ONE room at a time (key invariant).
    player_rooms: HashMap<PlayerId, RoomId>,

    /// Per-variant configuration handed to the engine factory.
    settings: EngineSettings,
}

impl SessionRegistry {
    /// Creates an empty registry with default game settings.
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    /// Creates an empty registry with custom game settings.
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
            settings,
        }
    }

    /// Creates a room for `variant_type` with the creator as its first
    /// player.
    pub fn create_room(
        &mut self,
        player_id: PlayerId,
        player_name: &str,
        variant_type: &str,
    ) -> Result<RoomSnapshot, RegistryError> {
        let variant = GameVariant::parse(variant_type)
            .ok_or_else(|| RegistryError::UnknownVariant(variant_type.to_string()))?;
        if let Some(current) = self.player_rooms.get(&player_id) {
            return Err(RegistryError::PlayerAlreadyInRoom(player_id, *current));
        }

        let room_id = RoomId(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed));
        let mut room = Room::new(room_id, variant);
        room.roster.add(player_id.clone(), player_name);

        let snapshot = room.snapshot(None);
        self.rooms.insert(room_id, room);
        self.player_rooms.insert(player_id, room_id);
        tracing::info!(%room_id, %variant, "room created");
        Ok(snapshot)
    }

    /// Adds a player to a room.
    ///
    /// Enforces the "one room at a time" invariant, the Waiting-only
    /// join window, and the variant's capacity.
    pub fn join_room(
        &mut self,
        room_id: RoomId,
        player_id: PlayerId,
        player_name: &str,
    ) -> Result<RoomSnapshot, RegistryError> {
        if let Some(current) = self.player_rooms.get(&player_id) {
            return Err(RegistryError::PlayerAlreadyInRoom(player_id, *current));
        }
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(RegistryError::RoomNotFound(room_id))?;
        if !room.status.is_joinable() {
            return Err(RegistryError::RoomNotJoinable(room_id));
        }
        if room.is_full() {
            return Err(RegistryError::RoomFull(room_id));
        }

        room.roster.add(player_id.clone(), player_name);
        self.player_rooms.insert(player_id, room_id);
        tracing::info!(%room_id, players = room.roster.len(), "player joined");

        // The start condition is re-evaluated after every roster
        // change. A fresh joiner is never ready, so this can only fire
        // through a later ready flip or leave.
        if room.variant.can_start(&room.roster) {
            start_room(room, &self.settings);
        }
        Ok(room.snapshot(None))
    }

    /// Removes a player from their current room.
    ///
    /// The engine (if the game is running) drops the player from its
    /// transient state, and the room finishes if the variant's rules
    /// say a departure ends the game. A room left empty is destroyed;
    /// its final snapshot (empty player list) is still returned so the
    /// caller can announce the destruction.
    pub fn leave_room(&mut self, player_id: &PlayerId) -> Result<RoomSnapshot, RegistryError> {
        let room_id = self
            .player_rooms
            .get(player_id)
            .copied()
            .ok_or_else(|| RegistryError::PlayerNotInRoom(player_id.clone()))?;
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(RegistryError::RoomNotFound(room_id))?;

        room.roster.remove(player_id);
        self.player_rooms.remove(player_id);
        tracing::info!(%room_id, player = %player_id, "player left");

        if let Some(engine) = room.engine.as_mut() {
            engine.remove_player(&room.roster, player_id);
            if room.status == RoomStatus::InProgress && engine.is_finished() {
                finish_room(room);
            }
        } else if room.status == RoomStatus::Waiting && room.variant.can_start(&room.roster) {
            // The departed player may have been the only one not ready.
            start_room(room, &self.settings);
        }

        let snapshot = room.snapshot(None);
        if room.roster.is_empty() {
            self.rooms.remove(&room_id);
            tracing::info!(%room_id, "room destroyed");
        }
        Ok(snapshot)
    }

    /// Sets a player's ready flag.
    ///
    /// When the flag flips while the room is Waiting and the variant's
    /// start condition now holds, the game starts: the room walks
    /// Waiting → Starting → InProgress and the engine is built with the
    /// roster frozen in its current order. Starting is idempotent — a
    /// redundant ready toggle on a running room changes nothing.
    pub fn set_ready(
        &mut self,
        player_id: &PlayerId,
        ready: bool,
    ) -> Result<RoomSnapshot, RegistryError> {
        let room_id = self
            .player_rooms
            .get(player_id)
            .copied()
            .ok_or_else(|| RegistryError::PlayerNotInRoom(player_id.clone()))?;
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(RegistryError::RoomNotFound(room_id))?;
        let entry = room
            .roster
            .get_mut(player_id)
            .ok_or_else(|| RegistryError::PlayerNotInRoom(player_id.clone()))?;

        entry.ready = ready;
        tracing::debug!(%room_id, player = %player_id, ready, "ready flag set");

        if room.status == RoomStatus::Waiting && room.variant.can_start(&room.roster) {
            start_room(room, &self.settings);
        }
        Ok(room.snapshot(None))
    }

    /// Routes a game action from a player to their room's engine.
    ///
    /// Only valid while the room is InProgress. A rejected action
    /// (engine error) leaves the room untouched and yields no snapshot.
    pub fn submit_action(
        &mut self,
        player_id: &PlayerId,
        action: &str,
        payload: &Value,
    ) -> Result<RoomSnapshot, RegistryError> {
        let room_id = self
            .player_rooms
            .get(player_id)
            .copied()
            .ok_or_else(|| RegistryError::PlayerNotInRoom(player_id.clone()))?;
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(RegistryError::RoomNotFound(room_id))?;
        if room.status != RoomStatus::InProgress {
            return Err(RegistryError::RoomNotInProgress(room_id));
        }
        let engine = room
            .engine
            .as_mut()
            .ok_or(RegistryError::RoomNotInProgress(room_id))?;

        let outcome = engine.handle_action(&mut room.roster, player_id, action, payload)?;
        tracing::debug!(%room_id, player = %player_id, ?outcome, "action applied");

        if engine.is_finished() {
            finish_room(room);
        }
        Ok(room.snapshot(None))
    }

    /// Returns a snapshot of a room without mutating anything.
    pub fn get_snapshot(
        &self,
        room_id: RoomId,
        viewer: Option<&PlayerId>,
    ) -> Result<RoomSnapshot, RegistryError> {
        let room = self
            .rooms
            .get(&room_id)
            .ok_or(RegistryError::RoomNotFound(room_id))?;
        Ok(room.snapshot(viewer))
    }

    /// Returns the room a player is currently in, if any.
    pub fn room_of(&self, player_id: &PlayerId) -> Option<RoomId> {
        self.player_rooms.get(player_id).copied()
    }

    /// Lists snapshots of all rooms that are currently joinable.
    pub fn list_joinable(&self) -> Vec<RoomSnapshot> {
        let mut rooms: Vec<RoomSnapshot> = self
            .rooms
            .values()
            .filter(|r| r.status.is_joinable())
            .map(|r| r.snapshot(None))
            .collect();
        rooms.sort_by_key(|s| s.room_id.0);
        rooms
    }

    /// Snapshots of every active room, in room-ID order.
    pub fn snapshots(&self) -> Vec<RoomSnapshot> {
        let mut all: Vec<RoomSnapshot> =
            self.rooms.values().map(|r| r.snapshot(None)).collect();
        all.sort_by_key(|s| s.room_id.0);
        all
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks a Waiting room through Starting into InProgress and builds its
/// engine. The caller has already verified the start condition.
fn start_room(room: &mut Room, settings: &EngineSettings) {
    debug_assert!(room.status.can_transition_to(RoomStatus::Starting));
    room.status = RoomStatus::Starting;
    room.engine = Some(build_engine(room.variant, &room.roster, settings));
    room.status = RoomStatus::InProgress;
    tracing::info!(room_id = %room.id, variant = %room.variant, "game started");
}

/// Moves an InProgress room to Finished and records the winner: the
/// strict score maximum, first-in-roster-order on ties, `None` for an
/// empty roster.
fn finish_room(room: &mut Room) {
    debug_assert!(room.status.can_transition_to(RoomStatus::Finished));
    room.winner = room.roster.leader().map(|p| p.id.clone());
    room.status = RoomStatus::Finished;
    tracing::info!(room_id = %room.id, winner = ?room.winner, "game finished");
}
