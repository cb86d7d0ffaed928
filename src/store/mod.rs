//! File-backed record stores.
//!
//! [`Store`] keeps a whole collection in memory and rewrites its JSON file on
//! every mutation. Two instantiations exist:
//!
//! - [`MessageStore`] -- `messages.json`, with display-window and age queries.
//! - [`DismissedStore`] -- `dismissed.json`, with a per-user query.

mod dismissed;
mod fs;
mod message;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

pub use fs::JsonFile;

use crate::error::{HomeMessageError, Result};
use crate::record::{Dismissed, Message, Record, unix_now};

/// Store of home-page messages.
pub type MessageStore = Store<Message>;

/// Store of per-user dismissals.
pub type DismissedStore = Store<Dismissed>;

/// Cached, file-persisted collection of records of one type.
///
/// Records are kept in insertion order. Every mutating call changes the
/// in-memory collection and then rewrites the backing file before returning,
/// all under one lock, so a single store instance can be shared across
/// threads behind an [`Arc`].
///
/// # Example
///
/// ```rust,no_run
/// use home_message::{Message, MessageStore};
///
/// # fn example() -> home_message::Result<()> {
/// let store = MessageStore::open_in("/var/lib/media/plugins/HomeMessage")?;
/// let stored = store.add(Message::new("Welcome", "<p>Hello</p>"))?;
/// assert_eq!(store.get_by_id(&stored.id), Some(stored));
/// # Ok(())
/// # }
/// ```
pub struct Store<T: Record> {
    file: JsonFile,
    cache: Mutex<Vec<T>>,
}

impl<T: Record> Store<T> {
    /// Open `dir/filename`, creating `dir` if needed and loading any existing
    /// records.
    pub fn open(dir: impl Into<PathBuf>, filename: &str) -> Result<Self> {
        let file = JsonFile::create_in(dir, filename)?;
        let records: Vec<T> = file.load()?;
        tracing::debug!(
            "Loaded {} records from {}",
            records.len(),
            file.path().display()
        );

        Ok(Self {
            file,
            cache: Mutex::new(records),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Assign a fresh id and creation time, append, persist, and return the
    /// stored record.
    ///
    /// If the file cannot be written the record is taken back out of the
    /// cache before the error is returned.
    pub fn add(&self, mut record: T) -> Result<T> {
        let mut cache = self.cache.lock();

        let mut id = Uuid::new_v4().to_string();
        while cache.iter().any(|r| r.id() == id) {
            id = Uuid::new_v4().to_string();
        }
        record.set_identity(id, unix_now());

        cache.push(record.clone());
        if let Err(e) = self.file.save(&cache) {
            cache.pop();
            return Err(e);
        }
        Ok(record)
    }

    /// Record with this id, or `None` if the store has none.
    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.cache.lock().iter().find(|r| r.id() == id).cloned()
    }

    /// Snapshot of every record in insertion order.
    pub fn get_all(&self) -> Vec<T> {
        self.cache.lock().clone()
    }

    /// Snapshot of the records matching `predicate`, in insertion order.
    pub fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.cache
            .lock()
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Replace the record `id` with `record`, keeping the existing id and
    /// creation time and its position in the collection.
    ///
    /// Returns [`HomeMessageError::NotFound`] if no record has that id. If the
    /// file cannot be written the previous record is put back.
    pub fn update(&self, id: &str, mut record: T) -> Result<T> {
        let mut cache = self.cache.lock();
        let index = cache
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| HomeMessageError::NotFound(id.to_string()))?;

        let existing = &cache[index];
        record.set_identity(existing.id().to_string(), existing.created_time());
        let previous = std::mem::replace(&mut cache[index], record.clone());

        if let Err(e) = self.file.save(&cache) {
            cache[index] = previous;
            return Err(e);
        }
        Ok(record)
    }

    /// Remove every record with this id and persist. Returns how many were
    /// removed; an unknown id removes nothing and is not an error.
    ///
    /// The cache only changes once the file has been written.
    pub fn remove(&self, id: &str) -> Result<usize> {
        let mut cache = self.cache.lock();
        let kept: Vec<T> = cache.iter().filter(|r| r.id() != id).cloned().collect();
        let removed = cache.len() - kept.len();

        self.file.save(&kept)?;
        *cache = kept;
        tracing::info!(
            "Removed {removed} record(s) from {}",
            self.file.path().display()
        );
        Ok(removed)
    }
}

/// The two stores the plugin keeps, side by side in one directory.
#[derive(Clone)]
pub struct Stores {
    pub messages: Arc<MessageStore>,
    pub dismissed: Arc<DismissedStore>,
}

impl Stores {
    /// Open `messages.json` and `dismissed.json` under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            messages: Arc::new(MessageStore::open_in(dir)?),
            dismissed: Arc::new(DismissedStore::open_in(dir)?),
        })
    }

    /// Messages visible to `user_id` right now.
    pub fn visible_for(&self, user_id: &str) -> Vec<Message> {
        let dismissed = self.dismissed.get_by_user_id(user_id);
        self.messages.get_not_dismissed(&dismissed)
    }
}
