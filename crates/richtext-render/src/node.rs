//! Document tree model.
//!
//! Mirrors the JSON serialization of rich-text documents: every node has a
//! `type` and may carry `attrs`, `content`, `text` and `marks`. Marks share
//! the node shape, so they are represented with [`Node`] as well.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Insertion-ordered attribute mapping.
pub type Attrs = serde_json::Map<String, Value>;

/// A node (or mark) in a rich-text document tree.
///
/// The document root is itself a node, conventionally of type `doc`.
///
/// # Example
///
/// ```
/// use richtext_render::Node;
///
/// let doc = Node::new("doc").with_content(vec![
///     Node::new("paragraph").with_content(vec![
///         Node::text("Hello").with_mark(Node::new("bold")),
///     ]),
/// ]);
/// assert_eq!(doc.content.as_ref().map(Vec::len), Some(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Type name used to look up a resolver in the schema.
    #[serde(rename = "type")]
    pub kind: String,
    /// Node attributes (link targets, image sources, heading levels, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    /// Child nodes of a container node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
    /// Text of a leaf text node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline marks wrapping this node, outermost first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Node>>,
}

impl Node {
    /// Create a node of the given type with no attributes or children.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Create a `text` leaf node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_owned(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set an attribute, creating the attribute map if needed.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the children of this node.
    #[must_use]
    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = Some(content);
        self
    }

    /// Append a mark. Marks added first wrap outermost.
    #[must_use]
    pub fn with_mark(mut self, mark: Node) -> Self {
        self.marks.get_or_insert_with(Vec::new).push(mark);
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_text_with_marks() {
        let node: Node = serde_json::from_value(json!({
            "type": "text",
            "text": "red text",
            "marks": [{ "type": "styled", "attrs": { "class": "red" } }]
        }))
        .unwrap();

        assert_eq!(node.kind, "text");
        assert_eq!(node.text.as_deref(), Some("red text"));
        let marks = node.marks.unwrap();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].kind, "styled");
        assert_eq!(marks[0].attr("class"), Some(&json!("red")));
    }

    #[test]
    fn test_attrs_keep_insertion_order() {
        let node: Node = serde_json::from_str(
            r#"{"type": "image", "attrs": {"title": "t", "alt": "a", "src": "s"}}"#,
        )
        .unwrap();

        let attrs = node.attrs.unwrap();
        let keys: Vec<&str> = attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "alt", "src"]);
    }

    #[test]
    fn test_null_attrs_is_absent() {
        let node: Node = serde_json::from_value(json!({ "type": "heading", "attrs": null })).unwrap();
        assert!(node.attrs.is_none());
        assert!(node.attr("level").is_none());
    }

    #[test]
    fn test_non_object_attrs_rejected() {
        let result = serde_json::from_value::<Node>(json!({ "type": "image", "attrs": "src" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_helpers() {
        let node = Node::new("heading")
            .with_attr("level", 3)
            .with_content(vec![Node::text("Title")]);

        assert_eq!(node.attr("level"), Some(&json!(3)));
        assert_eq!(node.content.unwrap()[0].text.as_deref(), Some("Title"));
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let value = serde_json::to_value(Node::new("horizontal_rule")).unwrap();
        assert_eq!(value, json!({ "type": "horizontal_rule" }));
    }
}
