//! Wire protocol for the Parlor session coordinator.
//!
//! This crate defines the "language" spoken across the message bus:
//!
//! - **Types** ([`Command`], [`PlayerId`], [`RoomId`]) — the inbound
//!   command structures produced by the gateway.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between the bus (raw bytes) and the dispatch
//! adapter (registry calls). It doesn't know about rooms or game rules —
//! it only knows how to serialize and deserialize messages. Room
//! snapshots are assembled by the registry and pass through here as
//! plain serializable values.
//!
//! ```text
//! Bus (bytes) → Protocol (Command) → Dispatch (registry call)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{COMMAND_CHANNEL, Command, PlayerId, RoomId, STATE_CHANNEL};
