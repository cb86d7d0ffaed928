//! Handle for controlling the background expiry worker.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{HomeMessageError, Result};

/// Handle returned by [`ExpiryBuilder::build`](crate::ExpiryBuilder::build).
///
/// Owns the shutdown signal and the worker task join handle. Dropping the
/// handle without calling [`shutdown`](Self::shutdown) leaves the worker
/// running until the runtime stops.
pub struct ExpiryHandle {
    trigger: mpsc::Sender<()>,
    shutdown: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ExpiryHandle {
    pub(crate) fn new(
        trigger: mpsc::Sender<()>,
        shutdown: oneshot::Sender<()>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            trigger,
            shutdown: Some(shutdown),
            worker: Some(worker),
        }
    }

    /// Ask the worker to sweep immediately instead of waiting for the next
    /// tick.
    ///
    /// Non-blocking. Returns [`HomeMessageError::ChannelClosed`] if a sweep
    /// is already queued or the worker has stopped.
    pub fn run_now(&self) -> Result<()> {
        self.trigger
            .try_send(())
            .map_err(|_| HomeMessageError::ChannelClosed)
    }

    /// Gracefully shut down the background worker.
    ///
    /// A sweep already in progress finishes before this returns.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.worker.take() {
            let _ = handle.await;
        }
    }
}
