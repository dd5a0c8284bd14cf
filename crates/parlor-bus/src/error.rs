/// Errors that can occur in the bus layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// The command queue's consumer is gone; nothing will read this
    /// message.
    #[error("command queue closed")]
    Closed,
}
