//! # Parlor
//!
//! Session coordinator for multiplayer parlor games.
//!
//! Parlor turns a stream of client commands — create, join, ready,
//! act, leave — into authoritative room state. Rooms walk a strict
//! lifecycle (`Waiting → Starting → InProgress → Finished`), each
//! variant's rules live behind the [`GameEngine`] trait, and every
//! successful command is answered with exactly one [`RoomSnapshot`]
//! broadcast on the state channel.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parlor::{Coordinator, DispatchAdapter, InMemoryBus, JsonCodec};
//!
//! # async fn run() -> Result<(), parlor::CoordinatorError> {
//! let (bus, queue) = InMemoryBus::new();
//! let adapter = DispatchAdapter::new(bus.publisher(), JsonCodec);
//!
//! // Clients: bus.send_command(...) / bus.watch_updates()
//! Coordinator::new(queue, adapter).run().await
//! # }
//! ```

mod coordinator;
mod dispatch;
mod error;

pub use coordinator::Coordinator;
pub use dispatch::DispatchAdapter;
pub use error::CoordinatorError;

pub use parlor_bus::{
    BusError, BusMessage, BusPublisher, BusSubscriber, CommandQueue, InMemoryBus, UpdatePublisher,
    UpdateStream,
};
pub use parlor_engine::{
    ActionOutcome, EngineSettings, EngineState, GameEngine, GameError, GameVariant,
};
pub use parlor_protocol::{
    Codec, Command, JsonCodec, PlayerId, ProtocolError, RoomId, COMMAND_CHANNEL, STATE_CHANNEL,
};
pub use parlor_registry::{RegistryError, RoomSnapshot, RoomStatus, SessionRegistry};

/// Installs a `tracing` subscriber that reads its filter from
/// `RUST_LOG`, defaulting to `info`. Safe to call more than once; later
/// calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
