//! Expiry of old messages.

use std::sync::Arc;

use crate::error::Result;
use crate::record::unix_now;
use crate::store::MessageStore;

/// One sweep that deletes messages older than the configured expiration.
///
/// An expiration of `0` days disables the sweep. Dismissals pointing at the
/// removed messages are left in place.
#[derive(Clone)]
pub struct ExpireMessagesTask {
    store: Arc<MessageStore>,
    expiration_days: u32,
}

impl ExpireMessagesTask {
    /// Create a sweep over `store` removing messages older than
    /// `expiration_days`.
    pub fn new(store: Arc<MessageStore>, expiration_days: u32) -> Self {
        Self {
            store,
            expiration_days,
        }
    }

    /// Configured expiration in days; `0` means disabled.
    pub fn expiration_days(&self) -> u32 {
        self.expiration_days
    }

    /// Run the sweep now, returning the ids of the removed messages.
    pub fn execute(&self) -> Result<Vec<String>> {
        self.execute_at(unix_now())
    }

    /// Run the sweep as if the current time were `now`.
    pub fn execute_at(&self, now: i64) -> Result<Vec<String>> {
        if self.expiration_days == 0 {
            tracing::info!("Message expiry is disabled");
            return Ok(Vec::new());
        }

        let expired = self.store.get_older_than_days_at(self.expiration_days, now);
        let mut removed = Vec::with_capacity(expired.len());
        for message in expired {
            tracing::info!("Deleting message {}", message.id);
            self.store.remove(&message.id)?;
            removed.push(message.id);
        }
        Ok(removed)
    }
}
