//! Plugin configuration and the builder for the background expiry worker.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HomeMessageError, Result};
use crate::expire::ExpireMessagesTask;
use crate::handle::ExpiryHandle;
use crate::store::MessageStore;
use crate::worker;

/// Default number of days a message is kept.
pub const DEFAULT_EXPIRATION_DAYS: u32 = 365;

/// Stylesheet template applied to the home-page banner until an admin edits it.
pub const DEFAULT_STYLES: &str = "/* Wraps each message. */
.home-message-body {

}

/* The message title. */
.home-message-title {

}

/* The message time. */
.home-message-time {

}

/* The message text. */
.home-message-text p {

}";

/// Directory, relative to the host's data path, holding the store files.
pub fn plugin_data_dir(host_data_path: impl AsRef<Path>) -> PathBuf {
    host_data_path.as_ref().join("plugins").join("HomeMessage")
}

/// Settings the host persists for this plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PluginConfiguration {
    /// Days after which messages are deleted; `0` keeps them forever.
    pub expiration: u32,
    /// CSS injected alongside the rendered messages. Stored verbatim.
    pub styles: String,
}

impl Default for PluginConfiguration {
    fn default() -> Self {
        Self {
            expiration: DEFAULT_EXPIRATION_DAYS,
            styles: DEFAULT_STYLES.to_owned(),
        }
    }
}

/// Builder for configuring and starting an [`ExpiryHandle`].
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use home_message::{ExpiryBuilder, MessageStore};
///
/// # async fn example() -> home_message::Result<()> {
/// let store = Arc::new(MessageStore::open_in("/tmp/home-message")?);
/// let handle = ExpiryBuilder::new(store)
///     .expiration_days(30)
///     .check_interval(Duration::from_secs(3600))
///     .build()?;
///
/// // On shutdown:
/// handle.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct ExpiryBuilder {
    store: Arc<MessageStore>,
    expiration_days: u32,
    check_interval: Duration,
}

impl ExpiryBuilder {
    /// Create a new builder with defaults: 365 days, checked once a day.
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self {
            store,
            expiration_days: DEFAULT_EXPIRATION_DAYS,
            check_interval: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Create a builder taking the expiration from the host configuration.
    pub fn from_config(store: Arc<MessageStore>, config: &PluginConfiguration) -> Self {
        Self::new(store).expiration_days(config.expiration)
    }

    /// Age in days after which messages are deleted; `0` disables deletion.
    pub fn expiration_days(mut self, days: u32) -> Self {
        self.expiration_days = days;
        self
    }

    /// Time between two sweeps.
    pub fn check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// Consume the builder, spawn the background worker on the current tokio
    /// runtime, and return the [`ExpiryHandle`] controlling it.
    pub fn build(self) -> Result<ExpiryHandle> {
        if self.check_interval.is_zero() {
            return Err(HomeMessageError::Config(
                "check interval must be non-zero".into(),
            ));
        }

        let (trigger_tx, trigger_rx) = tokio::sync::mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let task = ExpireMessagesTask::new(self.store, self.expiration_days);

        let worker_handle = tokio::spawn(worker::run(
            trigger_rx,
            shutdown_rx,
            task,
            self.check_interval,
        ));

        Ok(ExpiryHandle::new(trigger_tx, shutdown_tx, worker_handle))
    }
}
