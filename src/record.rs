//! Record types persisted by the stores.
//!
//! Every persisted type implements [`Record`], which exposes the identity
//! fields the store assigns on insertion.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::sanitizer::Sanitizer;

/// Trait implemented by every type a [`Store`](crate::Store) can hold.
///
/// The store owns `id` and `created_time`: it assigns both in
/// [`add`](crate::Store::add) and carries them over in
/// [`update`](crate::Store::update). Implementors only expose them.
///
/// # Example
///
/// ```
/// use home_message::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Default, Serialize, Deserialize)]
/// struct Note {
///     id: String,
///     created_time: i64,
///     body: String,
/// }
///
/// impl Record for Note {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn created_time(&self) -> i64 {
///         self.created_time
///     }
///
///     fn set_identity(&mut self, id: String, created_time: i64) {
///         self.id = id;
///         self.created_time = created_time;
///     }
/// }
/// ```
pub trait Record: Clone + Serialize + DeserializeOwned + Send + 'static {
    /// Opaque unique identifier assigned by the store.
    fn id(&self) -> &str;

    /// Unix timestamp (seconds) of insertion.
    fn created_time(&self) -> i64;

    /// Overwrite both identity fields.
    fn set_identity(&mut self, id: String, created_time: i64);
}

/// Current time as Unix seconds.
pub(crate) fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// A message displayed on the home page.
///
/// `time_start`/`time_end` bound the display window `[start, end)`; an absent
/// bound is unbounded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Message {
    pub id: String,
    pub created_time: i64,
    pub title: String,
    /// Sanitized HTML.
    pub text: String,
    pub dismissible: bool,
    pub bg_color: String,
    pub text_color: String,
    pub time_start: Option<i64>,
    pub time_end: Option<i64>,
}

impl Message {
    /// Create an unbounded message with empty colors.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the display window.
    pub fn with_window(mut self, start: Option<i64>, end: Option<i64>) -> Self {
        self.time_start = start;
        self.time_end = end;
        self
    }

    /// Returns `true` if `now` falls inside the display window.
    pub fn is_active_at(&self, now: i64) -> bool {
        self.time_start.is_none_or(|start| start <= now)
            && self.time_end.is_none_or(|end| end > now)
    }
}

impl Record for Message {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_time(&self) -> i64 {
        self.created_time
    }

    fn set_identity(&mut self, id: String, created_time: i64) {
        self.id = id;
        self.created_time = created_time;
    }
}

/// Marks that a user has hidden a message from their own view.
///
/// `message_id` is matched by string only; removing the message leaves the
/// dismissal behind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Dismissed {
    pub id: String,
    pub created_time: i64,
    pub message_id: String,
    pub user_id: String,
}

impl Dismissed {
    /// Create a dismissal of `message_id` by `user_id`, without identity.
    pub fn new(message_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}

impl Record for Dismissed {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_time(&self) -> i64 {
        self.created_time
    }

    fn set_identity(&mut self, id: String, created_time: i64) {
        self.id = id;
        self.created_time = created_time;
    }
}

/// Admin-submitted message fields, before sanitization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MessageInput {
    pub title: String,
    pub text: String,
    pub dismissible: bool,
    pub bg_color: String,
    pub text_color: String,
    pub time_start: Option<i64>,
    pub time_end: Option<i64>,
}

impl MessageInput {
    /// Build a [`Message`] whose `text` has been passed through `sanitizer`.
    ///
    /// The result has no identity yet; hand it to
    /// [`Store::add`](crate::Store::add) or [`Store::update`](crate::Store::update).
    pub fn into_message(self, sanitizer: &impl Sanitizer) -> Message {
        Message {
            id: String::new(),
            created_time: 0,
            text: sanitizer.sanitize(&self.text),
            title: self.title,
            dismissible: self.dismissible,
            bg_color: self.bg_color,
            text_color: self.text_color,
            time_start: self.time_start,
            time_end: self.time_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlSanitizer;

    #[test]
    fn window_bounds_are_half_open() {
        let msg = Message::new("t", "x").with_window(Some(100), Some(200));
        assert!(!msg.is_active_at(99));
        assert!(msg.is_active_at(100));
        assert!(msg.is_active_at(199));
        assert!(!msg.is_active_at(200));
    }

    #[test]
    fn absent_bounds_are_unbounded() {
        let msg = Message::new("t", "x");
        assert!(msg.is_active_at(i64::MIN));
        assert!(msg.is_active_at(i64::MAX));

        let only_end = Message::new("t", "x").with_window(None, Some(10));
        assert!(only_end.is_active_at(-1_000));
        assert!(!only_end.is_active_at(10));
    }

    #[test]
    fn message_serializes_with_pascal_case_keys() {
        let msg = Message {
            id: "abc".into(),
            created_time: 42,
            bg_color: "#333".into(),
            ..Message::new("Hi", "<p>x</p>")
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["Id"], "abc");
        assert_eq!(json["CreatedTime"], 42);
        assert_eq!(json["BgColor"], "#333");
        assert!(json["TimeStart"].is_null());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let msg: Message = serde_json::from_str(r#"{"Id":"1","Title":"Old"}"#).unwrap();
        assert_eq!(msg.id, "1");
        assert_eq!(msg.title, "Old");
        assert_eq!(msg.created_time, 0);
        assert!(!msg.dismissible);
        assert_eq!(msg.time_end, None);
    }

    #[test]
    fn input_text_is_sanitized() {
        let input = MessageInput {
            title: "Maintenance <b>tonight</b>".into(),
            text: r#"<p onclick="x()">Down at <script>9</script>pm</p>"#.into(),
            dismissible: true,
            time_end: Some(500),
            ..Default::default()
        };
        let msg = input.into_message(&HtmlSanitizer::new());
        assert_eq!(msg.text, "<p>Down at 9pm</p>");
        assert_eq!(msg.title, "Maintenance <b>tonight</b>");
        assert!(msg.dismissible);
        assert_eq!(msg.time_end, Some(500));
        assert!(msg.id.is_empty());
    }
}
