//! The coordinator loop: drains the command queue one message at a
//! time.
//!
//! Single-threaded by construction — commands are processed strictly in
//! arrival order, so no two mutations ever race and snapshot broadcasts
//! always reflect a consistent registry.

use parlor_bus::{BusPublisher, BusSubscriber};
use parlor_protocol::Codec;

use crate::dispatch::DispatchAdapter;
use crate::CoordinatorError;

/// Owns the command queue and the dispatch adapter, and runs the drain
/// loop until the queue closes.
pub struct Coordinator<S: BusSubscriber, P: BusPublisher, C: Codec> {
    queue: S,
    adapter: DispatchAdapter<P, C>,
}

impl<S: BusSubscriber, P: BusPublisher, C: Codec> Coordinator<S, P, C> {
    pub fn new(queue: S, adapter: DispatchAdapter<P, C>) -> Self {
        Self { queue, adapter }
    }

    /// Runs until the command queue closes (every producer dropped).
    ///
    /// On shutdown, publishes a final snapshot of each room still alive
    /// so subscribers see the registry's last word.
    pub async fn run(mut self) -> Result<(), CoordinatorError> {
        tracing::info!("coordinator running");

        while let Some(msg) = self.queue.recv().await {
            self.adapter.handle_message(&msg)?;
        }

        for snapshot in self.adapter.registry().snapshots() {
            self.adapter.broadcast(&snapshot)?;
        }
        tracing::info!("command queue closed, coordinator stopped");
        Ok(())
    }
}
