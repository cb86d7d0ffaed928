//! Background worker that periodically expires old messages.
//!
//! This module is internal -- users interact with it indirectly through
//! [`ExpiryHandle`](crate::ExpiryHandle).

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};

use crate::expire::ExpireMessagesTask;

pub async fn run(
    mut trigger_rx: mpsc::Receiver<()>,
    mut shutdown_rx: oneshot::Receiver<()>,
    task: ExpireMessagesTask,
    check_interval: Duration,
) {
    let mut interval = time::interval(check_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Skip the first immediate tick
    interval.tick().await;

    tracing::info!(
        "Expiry worker started ({} days, every {:?})",
        task.expiration_days(),
        check_interval
    );

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown_rx => {
                tracing::info!("Expiry worker shut down");
                return;
            }

            Some(()) = trigger_rx.recv() => {
                sweep(&task).await;
            }

            _ = interval.tick() => {
                sweep(&task).await;
            }
        }
    }
}

/// Run one sweep on the blocking pool; store calls do synchronous file I/O.
async fn sweep(task: &ExpireMessagesTask) {
    let task = task.clone();
    match tokio::task::spawn_blocking(move || task.execute()).await {
        Ok(Ok(removed)) => {
            tracing::debug!("Expired {} message(s)", removed.len());
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to expire messages: {e}");
        }
        Err(e) => {
            tracing::error!("Expiry sweep panicked or was cancelled: {e}");
        }
    }
}
