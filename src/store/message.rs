use std::collections::HashSet;
use std::path::PathBuf;

use super::{MessageStore, Store};
use crate::error::Result;
use crate::record::{Dismissed, Message, unix_now};

const SECONDS_PER_DAY: i64 = 86_400;

impl Store<Message> {
    pub const FILE_NAME: &'static str = "messages.json";

    /// Open `dir/messages.json`.
    pub fn open_in(dir: impl Into<PathBuf>) -> Result<MessageStore> {
        Self::open(dir, Self::FILE_NAME)
    }

    /// Messages not covered by `dismissed` whose display window contains now.
    pub fn get_not_dismissed(&self, dismissed: &[Dismissed]) -> Vec<Message> {
        self.get_not_dismissed_at(dismissed, unix_now())
    }

    /// [`get_not_dismissed`](Self::get_not_dismissed) evaluated at `now`.
    pub fn get_not_dismissed_at(&self, dismissed: &[Dismissed], now: i64) -> Vec<Message> {
        let hidden: HashSet<&str> = dismissed.iter().map(|d| d.message_id.as_str()).collect();
        self.filter(|m| !hidden.contains(m.id.as_str()) && m.is_active_at(now))
    }

    /// Messages created strictly before `days` days ago.
    pub fn get_older_than_days(&self, days: u32) -> Vec<Message> {
        self.get_older_than_days_at(days, unix_now())
    }

    /// [`get_older_than_days`](Self::get_older_than_days) evaluated at `now`.
    pub fn get_older_than_days_at(&self, days: u32, now: i64) -> Vec<Message> {
        let cutoff = now - i64::from(days) * SECONDS_PER_DAY;
        self.filter(|m| m.created_time < cutoff)
    }
}
