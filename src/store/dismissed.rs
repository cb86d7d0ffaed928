use std::path::PathBuf;

use super::{DismissedStore, Store};
use crate::error::Result;
use crate::record::Dismissed;

impl Store<Dismissed> {
    pub const FILE_NAME: &'static str = "dismissed.json";

    /// Open `dir/dismissed.json`.
    pub fn open_in(dir: impl Into<PathBuf>) -> Result<DismissedStore> {
        Self::open(dir, Self::FILE_NAME)
    }

    /// Dismissals recorded by `user_id`, in insertion order.
    pub fn get_by_user_id(&self, user_id: &str) -> Vec<Dismissed> {
        self.filter(|d| d.user_id == user_id)
    }
}
