//! Room registry and lifecycle management for Parlor.
//!
//! The registry owns every live room: its roster, its lifecycle state,
//! and the game engine once the game starts. All mutation flows through
//! [`SessionRegistry`], single-threaded by construction — the dispatch
//! layer feeds it one command at a time, and each successful command
//! yields exactly one [`RoomSnapshot`] to broadcast.
//!
//! # Key types
//!
//! - [`SessionRegistry`] — creates/destroys rooms, routes players
//! - [`RoomStatus`] — lifecycle state machine
//! - [`RoomSnapshot`] — the observable state published after each command
//! - [`RegistryError`] — why a command was rejected

mod error;
mod registry;
mod room;

pub use error::RegistryError;
pub use registry::SessionRegistry;
pub use room::{RoomSnapshot, RoomStatus};
