//! Unified error type for the Parlor coordinator.

use parlor_bus::BusError;
use parlor_protocol::ProtocolError;
use parlor_registry::RegistryError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `parlor` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A registry-level error (full, not found, invalid state).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A bus-level error (queue closed).
    #[error(transparent)]
    Bus(#[from] BusError),
}
