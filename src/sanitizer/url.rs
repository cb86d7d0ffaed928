//! Link target validation for `href` values.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([a-zA-Z][a-zA-Z0-9+\-.]*):").expect("invalid scheme pattern")
});

/// Returns `true` if `url` may be kept as a link target.
///
/// The value is HTML-decoded and trimmed first. Empty values are unsafe.
/// A value with a `scheme:` prefix is safe only when the lowercased scheme is
/// in `allowed_schemes` (which must hold lowercase entries); a value without
/// one is a relative URL and always safe.
pub fn is_safe_url(url: &str, allowed_schemes: &HashSet<String>) -> bool {
    let decoded = html_escape::decode_html_entities(url);
    let url = decoded.trim();
    if url.is_empty() {
        return false;
    }

    match SCHEME.captures(url) {
        Some(caps) => allowed_schemes.contains(&caps[1].to_ascii_lowercase()),
        None => true,
    }
}
