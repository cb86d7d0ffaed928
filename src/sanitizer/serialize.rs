//! Serialize a parsed fragment back to markup while applying sanitizer
//! decisions, without mutating the tree.

use std::collections::{HashMap, HashSet};

use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;

/// HTML5 void elements that must not have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Per-element decisions collected by the sanitizer.
#[derive(Default)]
pub(super) struct Plan {
    /// Elements dropped together with their subtree.
    pub drop: HashSet<NodeId>,
    /// Elements replaced by their children.
    pub unwrap: HashSet<NodeId>,
    /// Attribute names stripped from kept elements.
    pub strip_attrs: HashMap<NodeId, Vec<String>>,
}

/// Serialize the children of `root` (the fragment's wrapper element).
/// Comments are always omitted.
pub(super) fn serialize_children(root: NodeRef<Node>, plan: &Plan) -> String {
    let mut out = String::new();
    for child in root.children() {
        serialize_node(child, plan, false, &mut out);
    }
    out
}

fn serialize_node(node: NodeRef<Node>, plan: &Plan, raw_text: bool, out: &mut String) {
    let id = node.id();
    match node.value() {
        Node::Element(el) => {
            if plan.drop.contains(&id) {
                return;
            }
            if plan.unwrap.contains(&id) {
                for child in node.children() {
                    serialize_node(child, plan, raw_text, out);
                }
                return;
            }

            let tag = el.name();
            out.push('<');
            out.push_str(tag);

            let stripped = plan.strip_attrs.get(&id);
            for (k, v) in el.attrs() {
                if stripped.is_some_and(|names| names.iter().any(|n| n == k)) {
                    continue;
                }
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(v));
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for child in node.children() {
                serialize_node(child, plan, raw, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        Node::Text(text) => {
            let text: &str = text;
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&html_escape::encode_text(text));
            }
        }
        _ => {}
    }
}
