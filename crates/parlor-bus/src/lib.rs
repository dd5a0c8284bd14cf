//! Message-bus abstraction for Parlor.
//!
//! Provides the [`BusPublisher`] and [`BusSubscriber`] traits that
//! abstract over the transport carrying commands in and state updates
//! out, plus [`InMemoryBus`], the in-process implementation.
//!
//! Delivery model:
//!
//! - **Commands** flow through a single ordered queue with exactly one
//!   consumer (the coordinator). Order of arrival is order of
//!   processing.
//! - **State updates** fan out to every subscriber, fire-and-forget.
//!   A slow subscriber may miss updates; it never blocks the publisher.

#![allow(async_fn_in_trait)]

mod error;

pub use error::BusError;

use tokio::sync::{broadcast, mpsc};

/// Buffered updates per subscriber before the oldest are dropped.
const UPDATE_BUFFER: usize = 256;

/// One message on the bus: a channel name and an opaque payload.
///
/// The bus never looks inside the payload; encoding and decoding are
/// the protocol layer's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    pub channel: String,
    pub payload: Vec<u8>,
}

/// Publishes messages onto the bus.
pub trait BusPublisher: Send + Sync + 'static {
    /// Publishes a payload on a channel. Fire-and-forget: delivery to
    /// zero subscribers is not an error.
    fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), BusError>;
}

/// Receives messages from the bus.
pub trait BusSubscriber: Send + 'static {
    /// Waits for the next message. Returns `None` once the bus side
    /// feeding this subscriber is gone.
    async fn recv(&mut self) -> Option<BusMessage>;
}

// ---------------------------------------------------------------------------
// InMemoryBus
// ---------------------------------------------------------------------------

/// In-process bus: an ordered command queue into the coordinator and a
/// broadcast fan-out of state updates back to clients.
///
/// This is the client-side handle — cloneable, every clone feeds the
/// same command queue and watches the same fan-out. The command queue
/// closes once every `InMemoryBus` clone is dropped, so the
/// coordinator's own outbound handle is the separate
/// [`UpdatePublisher`], which holds no command sender.
#[derive(Clone)]
pub struct InMemoryBus {
    commands: mpsc::UnboundedSender<BusMessage>,
    updates: broadcast::Sender<BusMessage>,
}

/// The consuming end of the command queue. Exactly one exists per bus.
pub struct CommandQueue {
    rx: mpsc::UnboundedReceiver<BusMessage>,
}

/// The publishing end of the update fan-out, held by the coordinator.
#[derive(Clone)]
pub struct UpdatePublisher {
    updates: broadcast::Sender<BusMessage>,
}

/// A subscription to the update fan-out.
pub struct UpdateStream {
    rx: broadcast::Receiver<BusMessage>,
}

impl InMemoryBus {
    /// Creates a bus and the command queue its coordinator will drain.
    pub fn new() -> (Self, CommandQueue) {
        let (commands, rx) = mpsc::unbounded_channel();
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);
        (Self { commands, updates }, CommandQueue { rx })
    }

    /// Enqueues a command payload for the coordinator.
    pub fn send_command(&self, channel: &str, payload: Vec<u8>) -> Result<(), BusError> {
        self.commands
            .send(BusMessage {
                channel: channel.to_string(),
                payload,
            })
            .map_err(|_| BusError::Closed)
    }

    /// Subscribes to state updates published after this call.
    pub fn watch_updates(&self) -> UpdateStream {
        UpdateStream {
            rx: self.updates.subscribe(),
        }
    }

    /// Returns the outbound handle used to publish state updates.
    pub fn publisher(&self) -> UpdatePublisher {
        UpdatePublisher {
            updates: self.updates.clone(),
        }
    }
}

impl BusPublisher for UpdatePublisher {
    fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), BusError> {
        // send() errors only when there are no subscribers; that is
        // normal for fire-and-forget fan-out.
        let _ = self.updates.send(BusMessage {
            channel: channel.to_string(),
            payload,
        });
        Ok(())
    }
}

impl BusSubscriber for CommandQueue {
    async fn recv(&mut self) -> Option<BusMessage> {
        self.rx.recv().await
    }
}

impl BusSubscriber for UpdateStream {
    async fn recv(&mut self) -> Option<BusMessage> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => return Some(msg),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "subscriber lagged, updates dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
