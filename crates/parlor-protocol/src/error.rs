//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding bus messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields, an
    /// unknown command type tag, or truncated messages. The dispatch
    /// adapter treats these as drop-after-logging — redelivering the
    /// same bytes would fail identically.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded fine but violates the protocol contract,
    /// e.g. a command naming a room the sender isn't in.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
