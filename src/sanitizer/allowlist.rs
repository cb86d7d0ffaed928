//! Allow-list HTML sanitizer for user-authored rich text.

use std::collections::{HashMap, HashSet};

use scraper::Html;

use super::Sanitizer;
use super::serialize::{Plan, serialize_children};
use super::url::is_safe_url;

const DEFAULT_TAGS: &[&str] = &["b", "i", "u", "s", "a", "strong", "em", "p", "br"];
const DEFAULT_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

fn lowercase_set<I, S>(items: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_ascii_lowercase())
        .collect()
}

/// Sanitizer that keeps only allow-listed tags, attributes and link schemes.
///
/// Defaults: tags `b i u s a strong em p br`, only `href` on `a`, schemes
/// `http https mailto tel`, disallowed tags unwrapped. All names are matched
/// case-insensitively. Comments are always removed.
///
/// # Example
///
/// ```
/// use home_message::{HtmlSanitizer, Sanitizer};
///
/// let sanitizer = HtmlSanitizer::new();
/// let html = r#"<p>Hi <a href="javascript:alert(1)" title="t">there</a></p>"#;
/// assert_eq!(sanitizer.sanitize(html), "<p>Hi <a>there</a></p>");
///
/// let strict = HtmlSanitizer::new().unwrap_disallowed(false);
/// assert_eq!(strict.sanitize("<p>a<span>b</span></p>"), "<p>a</p>");
/// ```
#[derive(Clone, Debug)]
pub struct HtmlSanitizer {
    allowed_tags: HashSet<String>,
    allowed_attributes: HashMap<String, HashSet<String>>,
    allowed_schemes: HashSet<String>,
    unwrap_disallowed: bool,
}

impl HtmlSanitizer {
    /// Create a sanitizer with the default policy.
    pub fn new() -> Self {
        Self {
            allowed_tags: lowercase_set(DEFAULT_TAGS),
            allowed_attributes: HashMap::from([("a".to_string(), lowercase_set(["href"]))]),
            allowed_schemes: lowercase_set(DEFAULT_SCHEMES),
            unwrap_disallowed: true,
        }
    }

    /// Replace the set of tags kept as elements.
    pub fn allowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_tags = lowercase_set(tags);
        self
    }

    /// Replace the per-tag attribute allow-list.
    pub fn allowed_attributes<I, T, A, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (T, A)>,
        T: AsRef<str>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_attributes = attributes
            .into_iter()
            .map(|(tag, attrs)| (tag.as_ref().to_ascii_lowercase(), lowercase_set(attrs)))
            .collect();
        self
    }

    /// Replace the set of URL schemes accepted in `a[href]`.
    pub fn allowed_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_schemes = lowercase_set(schemes);
        self
    }

    /// `true` keeps the children of a disallowed tag, `false` drops its
    /// whole subtree.
    pub fn unwrap_disallowed(mut self, unwrap: bool) -> Self {
        self.unwrap_disallowed = unwrap;
        self
    }

    fn plan(&self, fragment: &Html) -> Plan {
        let mut plan = Plan::default();
        let root = fragment.root_element();

        for node in root.descendants().skip(1) {
            let Some(el) = node.value().as_element() else {
                continue;
            };
            let id = node.id();
            let tag = el.name().to_ascii_lowercase();

            if !self.allowed_tags.contains(&tag) {
                if self.unwrap_disallowed {
                    plan.unwrap.insert(id);
                } else {
                    plan.drop.insert(id);
                }
                continue;
            }

            let allowed = self.allowed_attributes.get(&tag);
            let mut stripped = Vec::new();
            for (name, value) in el.attrs() {
                let lower = name.to_ascii_lowercase();
                let keep = allowed.is_some_and(|attrs| attrs.contains(&lower))
                    && !(tag == "a"
                        && lower == "href"
                        && !is_safe_url(value, &self.allowed_schemes));
                if !keep {
                    stripped.push(name.to_string());
                }
            }
            if !stripped.is_empty() {
                plan.strip_attrs.insert(id, stripped);
            }
        }

        plan
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for HtmlSanitizer {
    fn sanitize(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }

        let fragment = Html::parse_fragment(html);
        let plan = self.plan(&fragment);
        tracing::trace!(
            "Sanitizing fragment: {} unwrapped, {} dropped, {} with stripped attributes",
            plan.unwrap.len(),
            plan.drop.len(),
            plan.strip_attrs.len()
        );
        serialize_children(*fragment.root_element(), &plan)
    }
}
