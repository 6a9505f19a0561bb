//! The standard rich-text mapping table.

use serde_json::Value;

use super::Schema;
use crate::node::{Attrs, Node};
use crate::serializer::attribute_text;
use crate::tag::{TagDescriptor, TagElement};

/// Marks that map to a fixed paired tag.
const SIMPLE_MARKS: &[(&str, &str)] = &[
    ("bold", "b"),
    ("strike", "strike"),
    ("underline", "u"),
    ("strong", "strong"),
    ("code", "code"),
    ("italic", "i"),
];

/// Nodes that map to a fixed paired tag.
const SIMPLE_NODES: &[(&str, &str)] = &[
    ("blockquote", "blockquote"),
    ("bullet_list", "ul"),
    ("list_item", "li"),
    ("ordered_list", "ol"),
    ("paragraph", "p"),
];

/// Nodes that map to a fixed self-closing tag.
const SINGLE_NODES: &[(&str, &str)] = &[("horizontal_rule", "hr"), ("hard_break", "br")];

/// Image attributes that survive into the `<img>` tag.
const IMAGE_ATTRS: &[&str] = &["src", "alt", "title"];

pub(super) fn default_schema() -> Schema {
    let mut schema = Schema::empty();
    for &(name, tag) in SIMPLE_MARKS {
        schema = schema.with_static_mark(name, TagDescriptor::tag(tag));
    }
    for &(name, tag) in SIMPLE_NODES {
        schema = schema.with_static_node(name, TagDescriptor::tag(tag));
    }
    for &(name, tag) in SINGLE_NODES {
        schema = schema.with_static_node(name, TagDescriptor::single_tag(tag));
    }
    schema
        .with_mark("link", link)
        .with_mark("styled", styled)
        .with_node("image", image)
        .with_node("code_block", code_block)
        .with_node("heading", heading)
}

/// `<span>` carrying the mark's attributes verbatim.
fn styled(mark: &Node) -> TagDescriptor {
    TagDescriptor::Tag(vec![TagElement {
        name: "span".to_owned(),
        attrs: mark.attrs.clone(),
    }])
}

/// `<a>` with the link attribute rules applied.
///
/// - a non-empty `anchor` is appended to `href` as a fragment; `anchor` is always dropped
/// - `email` links get a `mailto:` prefix
/// - `story` links drop their `story`, `linktype` and `uuid` bookkeeping
/// - a nested `custom` object is flattened into the attributes
fn link(mark: &Node) -> TagDescriptor {
    let empty = Attrs::new();
    let attrs = mark.attrs.as_ref().unwrap_or(&empty);
    let link_type = attrs
        .get("linktype")
        .and_then(Value::as_str)
        .unwrap_or("url");

    let anchor = attrs
        .get("anchor")
        .and_then(attribute_text)
        .filter(|anchor| !anchor.is_empty());
    let mut href = None;
    if let Some(anchor) = anchor {
        href = Some(format!("{}#{anchor}", href_text(attrs)));
    }
    if link_type == "email" {
        let base = href.unwrap_or_else(|| href_text(attrs));
        href = Some(format!("mailto:{base}"));
    }

    let dropped: &[&str] = if link_type == "story" {
        &["anchor", "story", "linktype", "uuid"]
    } else {
        &["anchor"]
    };

    let mut out = Attrs::new();
    for (key, value) in attrs {
        if dropped.contains(&key.as_str()) {
            continue;
        }
        match (key.as_str(), value) {
            ("href", _) if href.is_some() => {
                out.insert(key.clone(), Value::from(href.take()));
            }
            ("custom", Value::Object(custom)) => {
                out.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    // `href` was rewritten but absent from the input attributes
    if let Some(href) = href {
        out.insert("href".to_owned(), Value::String(href));
    }

    TagDescriptor::Tag(vec![TagElement::with_attrs("a", out)])
}

fn href_text(attrs: &Attrs) -> String {
    attrs
        .get("href")
        .and_then(attribute_text)
        .unwrap_or_default()
}

/// Self-closing `<img>` keeping only `src`, `alt` and `title`.
fn image(node: &Node) -> TagDescriptor {
    let attrs = node.attrs.as_ref().map(|attrs| {
        attrs
            .iter()
            .filter(|(key, _)| IMAGE_ATTRS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect::<Attrs>()
    });
    TagDescriptor::SingleTag(vec![TagElement {
        name: "img".to_owned(),
        attrs,
    }])
}

/// `<pre><code ...>` with the block's attributes on `<code>`.
fn code_block(node: &Node) -> TagDescriptor {
    let attrs = node.attrs.clone().unwrap_or_default();
    TagDescriptor::Tag(vec!["pre".into(), TagElement::with_attrs("code", attrs)])
}

/// `<hN>` where N is `attrs.level`, defaulting to 1.
fn heading(node: &Node) -> TagDescriptor {
    let level = node
        .attr("level")
        .and_then(attribute_text)
        .unwrap_or_else(|| "1".to_owned());
    TagDescriptor::tag(format!("h{level}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mark(kind: &str, attrs: Value) -> Node {
        serde_json::from_value(json!({ "type": kind, "attrs": attrs })).unwrap()
    }

    fn link_attrs(attrs: Value) -> Value {
        let TagDescriptor::Tag(elements) = link(&mark("link", attrs)) else {
            panic!("link must resolve to a paired tag");
        };
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].name, "a");
        Value::Object(elements[0].attrs.clone().unwrap())
    }

    fn keys(value: &Value) -> Vec<&str> {
        value.as_object().unwrap().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_default_tables() {
        let schema = default_schema();
        assert_eq!(
            schema.mark_names(),
            vec!["bold", "code", "italic", "link", "strike", "strong", "styled", "underline"]
        );
        assert_eq!(
            schema.node_names(),
            vec![
                "blockquote",
                "bullet_list",
                "code_block",
                "hard_break",
                "heading",
                "horizontal_rule",
                "image",
                "list_item",
                "ordered_list",
                "paragraph"
            ]
        );
    }

    #[test]
    fn test_simple_marks_ignore_attrs() {
        let schema = default_schema();
        let bold = mark("bold", json!({ "class": "ignored" }));
        assert_eq!(schema.resolve_mark(&bold), Some(TagDescriptor::tag("b")));
        assert_eq!(
            schema.resolve_mark(&Node::new("underline")),
            Some(TagDescriptor::tag("u"))
        );
    }

    #[test]
    fn test_block_and_single_nodes() {
        let schema = default_schema();
        assert_eq!(
            schema.resolve_node(&Node::new("bullet_list")),
            Some(TagDescriptor::tag("ul"))
        );
        assert_eq!(
            schema.resolve_node(&Node::new("hard_break")),
            Some(TagDescriptor::single_tag("br"))
        );
        assert!(schema.resolve_node(&Node::new("text")).is_none());
    }

    #[test]
    fn test_styled_passes_attrs() {
        let descriptor = styled(&mark("styled", json!({ "class": "red", "id": "x" })));
        let TagDescriptor::Tag(elements) = descriptor else {
            panic!("styled must resolve to a paired tag");
        };
        assert_eq!(elements[0].name, "span");
        assert_eq!(
            Value::Object(elements[0].attrs.clone().unwrap()),
            json!({ "class": "red", "id": "x" })
        );
    }

    #[test]
    fn test_link_url_drops_nothing_but_anchor() {
        let attrs = link_attrs(json!({
            "href": "/link", "target": "_blank", "linktype": "url", "title": "Any title"
        }));
        assert_eq!(keys(&attrs), vec!["href", "target", "linktype", "title"]);
        assert_eq!(attrs["href"], "/link");
    }

    #[test]
    fn test_link_anchor_appended() {
        let attrs = link_attrs(json!({ "href": "/link", "anchor": "x" }));
        assert_eq!(attrs, json!({ "href": "/link#x" }));
    }

    #[test]
    fn test_link_empty_and_null_anchor_ignored() {
        assert_eq!(
            link_attrs(json!({ "href": "/link", "anchor": "" })),
            json!({ "href": "/link" })
        );
        assert_eq!(
            link_attrs(json!({ "href": "/link", "anchor": null })),
            json!({ "href": "/link" })
        );
    }

    #[test]
    fn test_link_email() {
        let attrs = link_attrs(json!({ "href": "a@b.com", "linktype": "email" }));
        assert_eq!(attrs["href"], "mailto:a@b.com");
    }

    #[test]
    fn test_link_email_with_anchor() {
        let attrs = link_attrs(json!({ "href": "a@b.com", "linktype": "email", "anchor": "top" }));
        assert_eq!(attrs["href"], "mailto:a@b.com#top");
    }

    #[test]
    fn test_link_story_strips_bookkeeping() {
        let attrs = link_attrs(json!({
            "href": "/link",
            "uuid": "0fe06b7d-03d8-4d66-8976-9f7febace056",
            "target": "_self",
            "linktype": "story",
            "anchor": "anchor-text",
            "story": { "_uid": "b94a6a90", "component": "page" }
        }));
        assert_eq!(attrs, json!({ "href": "/link#anchor-text", "target": "_self" }));
        assert_eq!(keys(&attrs), vec!["href", "target"]);
    }

    #[test]
    fn test_link_custom_attributes_flattened() {
        let attrs = link_attrs(json!({
            "href": "/link",
            "target": "_blank",
            "title": "Any title",
            "custom": { "rel": "alternate" }
        }));
        assert_eq!(keys(&attrs), vec!["href", "target", "title", "rel"]);
        assert_eq!(attrs["rel"], "alternate");
    }

    #[test]
    fn test_link_missing_href_with_anchor() {
        let attrs = link_attrs(json!({ "target": "_blank", "anchor": "top" }));
        assert_eq!(keys(&attrs), vec!["target", "href"]);
        assert_eq!(attrs["href"], "#top");
    }

    #[test]
    fn test_link_does_not_mutate_input() {
        let node = mark("link", json!({ "href": "/link", "anchor": "x", "linktype": "email" }));
        let before = node.clone();
        let _ = link(&node);
        assert_eq!(node, before);
    }

    #[test]
    fn test_image_picks_known_attrs() {
        let node = mark("image", json!({ "logo": "logo", "src": "https://asset", "alt": "Any description" }));
        let TagDescriptor::SingleTag(elements) = image(&node) else {
            panic!("image must resolve to a single tag");
        };
        assert_eq!(elements[0].name, "img");
        let attrs = Value::Object(elements[0].attrs.clone().unwrap());
        assert_eq!(keys(&attrs), vec!["src", "alt"]);
    }

    #[test]
    fn test_code_block_attrs_on_code() {
        let node = mark("code_block", json!({ "params": "js" }));
        let TagDescriptor::Tag(elements) = code_block(&node) else {
            panic!("code_block must resolve to a paired tag");
        };
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0], TagElement::from("pre"));
        assert_eq!(elements[1].name, "code");
        assert_eq!(
            Value::Object(elements[1].attrs.clone().unwrap()),
            json!({ "params": "js" })
        );
    }

    #[test]
    fn test_code_block_without_attrs() {
        let TagDescriptor::Tag(elements) = code_block(&Node::new("code_block")) else {
            panic!("code_block must resolve to a paired tag");
        };
        assert_eq!(elements[1], TagElement::with_attrs("code", Attrs::new()));
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading(&Node::new("heading")), TagDescriptor::tag("h1"));
        assert_eq!(
            heading(&Node::new("heading").with_attr("level", 2)),
            TagDescriptor::tag("h2")
        );
        assert_eq!(
            heading(&Node::new("heading").with_attr("other", 2)),
            TagDescriptor::tag("h1")
        );
    }
}
