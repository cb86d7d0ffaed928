//! HTML sanitization for user-supplied rich text.
//!
//! [`HtmlSanitizer`] parses the input as a fragment, then keeps only
//! allow-listed tags and attributes. Disallowed tags are unwrapped or dropped,
//! and `a[href]` values with a disallowed scheme are removed.

mod allowlist;
mod serialize;
mod url;

pub use allowlist::HtmlSanitizer;
pub use url::is_safe_url;

/// Trait for HTML content sanitizers.
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every request handler.
pub trait Sanitizer: Send + Sync {
    /// Transform the given HTML content, returning the sanitized result.
    fn sanitize(&self, html: &str) -> String;
}

/// Sanitize `html` with the default [`HtmlSanitizer`] policy.
pub fn sanitize_html(html: &str) -> String {
    HtmlSanitizer::new().sanitize(html)
}
