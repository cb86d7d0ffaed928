//! # home_message
//!
//! Core of a media-server home-page message plugin: a small file-backed record
//! store and an allow-list HTML sanitizer for admin-authored rich text.
//!
//! ## Overview
//!
//! - [`Store`] keeps a collection of [`Record`]s in memory and rewrites one
//!   JSON file on every mutation. [`MessageStore`] and [`DismissedStore`] add
//!   the display-window, age and per-user queries.
//! - [`HtmlSanitizer`] strips markup outside its allow-list and removes link
//!   targets with unsafe schemes.
//! - [`ExpiryBuilder`] spawns a background worker that deletes messages older
//!   than the configured expiration.
//!
//! The two core components are independent; the web layer wires them
//! together by sanitizing input before persisting it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use home_message::{Dismissed, HtmlSanitizer, MessageInput, Stores, plugin_data_dir};
//!
//! # fn example() -> home_message::Result<()> {
//! let stores = Stores::open(plugin_data_dir("/var/lib/media"))?;
//! let sanitizer = HtmlSanitizer::new();
//!
//! let input = MessageInput {
//!     title: "Maintenance".into(),
//!     text: "<p>Down tonight <script>x()</script></p>".into(),
//!     dismissible: true,
//!     ..Default::default()
//! };
//! let message = stores.messages.add(input.into_message(&sanitizer))?;
//!
//! stores.dismissed.add(Dismissed::new(&message.id, "user-1"))?;
//! assert!(stores.visible_for("user-1").is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod expire;
pub mod handle;
pub mod record;
pub mod sanitizer;
pub mod store;
mod worker;

pub use config::{DEFAULT_STYLES, ExpiryBuilder, PluginConfiguration, plugin_data_dir};
pub use error::{HomeMessageError, Result};
pub use expire::ExpireMessagesTask;
pub use handle::ExpiryHandle;
pub use record::{Dismissed, Message, MessageInput, Record};
pub use sanitizer::{HtmlSanitizer, Sanitizer, is_safe_url, sanitize_html};
pub use store::{DismissedStore, JsonFile, MessageStore, Store, Stores};
