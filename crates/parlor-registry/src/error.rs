//! Error types for the registry layer.

use parlor_engine::GameError;
use parlor_protocol::{PlayerId, RoomId};

/// Errors that can occur during registry operations.
///
/// All of these are recoverable: they reject the one command that
/// triggered them and leave every room untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// A create command named a game type the registry doesn't know.
    #[error("unknown game variant {0:?}")]
    UnknownVariant(String),

    /// The room does not exist.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// The room has no free player slots.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The room is past Waiting and no longer accepts joins.
    #[error("room {0} is not accepting players")]
    RoomNotJoinable(RoomId),

    /// The player is already in a room. A player is in at most one
    /// room at a time.
    #[error("player {0} is already in room {1}")]
    PlayerAlreadyInRoom(PlayerId, RoomId),

    /// The player is not in any room.
    #[error("player {0} is not in any room")]
    PlayerNotInRoom(PlayerId),

    /// A game action arrived while the room was not InProgress.
    #[error("room {0} has no game in progress")]
    RoomNotInProgress(RoomId),

    /// The engine rejected the action.
    #[error(transparent)]
    Game(#[from] GameError),
}
