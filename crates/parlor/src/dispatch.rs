//! Command dispatch: bus bytes in, room snapshots out.
//!
//! The adapter sits between the bus and the registry. For each inbound
//! message it decodes a [`Command`], routes it to the registry, and
//! publishes the returned snapshot on the state channel. Malformed
//! messages and rejected commands are logged and dropped — they never
//! stop the dispatch loop and never produce a broadcast.

use parlor_bus::{BusMessage, BusPublisher};
use parlor_engine::EngineSettings;
use parlor_protocol::{Codec, Command, PlayerId, ProtocolError, RoomId, COMMAND_CHANNEL, STATE_CHANNEL};
use parlor_registry::{RoomSnapshot, SessionRegistry};

use crate::CoordinatorError;

/// Decodes commands off the bus and applies them to the registry.
///
/// One snapshot is published per successful command; a failed command
/// publishes nothing. Generic over the publisher and codec so tests can
/// substitute their own.
pub struct DispatchAdapter<P: BusPublisher, C: Codec> {
    registry: SessionRegistry,
    publisher: P,
    codec: C,
}

impl<P: BusPublisher, C: Codec> DispatchAdapter<P, C> {
    /// Creates an adapter over a fresh registry with default game
    /// settings.
    pub fn new(publisher: P, codec: C) -> Self {
        Self::with_settings(publisher, codec, EngineSettings::default())
    }

    /// Creates an adapter with custom game settings.
    pub fn with_settings(publisher: P, codec: C, settings: EngineSettings) -> Self {
        Self {
            registry: SessionRegistry::with_settings(settings),
            publisher,
            codec,
        }
    }

    /// Read access to the registry, for callers that need snapshots
    /// outside the command flow.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Processes one bus message end to end.
    ///
    /// Returns `Err` only for infrastructure failures (encoding or
    /// publishing a snapshot); bad input from clients is consumed here.
    pub fn handle_message(&mut self, msg: &BusMessage) -> Result<(), CoordinatorError> {
        if msg.channel != COMMAND_CHANNEL {
            tracing::debug!(channel = %msg.channel, "ignoring message on unexpected channel");
            return Ok(());
        }
        let command: Command = match self.codec.decode(&msg.payload) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed command");
                return Ok(());
            }
        };
        self.dispatch(command)
    }

    /// Routes one decoded command to the registry and broadcasts the
    /// resulting snapshot.
    pub fn dispatch(&mut self, command: Command) -> Result<(), CoordinatorError> {
        let result = match command {
            Command::Create {
                player_id,
                player_name,
                variant_type,
            } => self
                .registry
                .create_room(player_id, &player_name, &variant_type),

            Command::Join {
                room_id,
                player_id,
                player_name,
            } => self.registry.join_room(room_id, player_id, &player_name),

            Command::Leave { player_id } => self.registry.leave_room(&player_id),

            Command::Ready {
                player_id,
                room_id,
                ready,
            } => {
                // The command names a room; make sure it is the one the
                // player is actually in before mutating anything.
                if let Err(e) = self.check_addressed_room(&player_id, room_id) {
                    tracing::warn!(error = %e, "command rejected");
                    return Ok(());
                }
                self.registry.set_ready(&player_id, ready)
            }

            Command::Action {
                room_id,
                player_id,
                action,
                payload,
            } => {
                if let Err(e) = self.check_addressed_room(&player_id, room_id) {
                    tracing::warn!(error = %e, "command rejected");
                    return Ok(());
                }
                self.registry.submit_action(&player_id, &action, &payload)
            }
        };

        match result {
            Ok(snapshot) => self.broadcast(&snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "command rejected");
                Ok(())
            }
        }
    }

    /// Verifies that the room a command addresses is the room the
    /// sender is actually in.
    fn check_addressed_room(
        &self,
        player_id: &PlayerId,
        room_id: RoomId,
    ) -> Result<(), ProtocolError> {
        if self.registry.room_of(player_id) == Some(room_id) {
            Ok(())
        } else {
            Err(ProtocolError::InvalidMessage(format!(
                "player {player_id} addressed room {room_id} but is not in it"
            )))
        }
    }

    /// Publishes one snapshot on the state channel.
    pub(crate) fn broadcast(&self, snapshot: &RoomSnapshot) -> Result<(), CoordinatorError> {
        let bytes = self.codec.encode(snapshot)?;
        self.publisher.publish(STATE_CHANNEL, bytes)?;
        tracing::debug!(room_id = %snapshot.room_id, status = %snapshot.status, "snapshot published");
        Ok(())
    }
}
