//! Recursive document renderer.

use serde::Deserialize;
use serde_json::Value;

use crate::error::RenderError;
use crate::node::Node;
use crate::schema::Schema;
use crate::serializer::{HtmlSerializer, TagSerializer};
use crate::tag::{TagDescriptor, TagElement};

/// Renders document trees to HTML using a [`Schema`] and a [`TagSerializer`].
///
/// A resolver holds no per-render state: `render` takes `&self`, so one
/// instance can be reused and shared across threads.
///
/// # Rendering order
///
/// For every node the output is:
///
/// 1. opening fragments of the node's marks, in list order
/// 2. the opening fragment of the node's paired tag
/// 3. the children, else the escaped text, else the node's self-closing tag,
///    else its raw HTML
/// 4. the closing fragment of the node's paired tag
/// 5. closing fragments of the marks, in reverse list order
///
/// Unknown node and mark types contribute no markup; their content still renders.
///
/// # Example
///
/// ```
/// use richtext_render::Resolver;
///
/// let html = Resolver::new()
///     .render_json(r#"{
///         "type": "doc",
///         "content": [{
///             "type": "paragraph",
///             "content": [{"type": "text", "text": "Hi", "marks": [{"type": "bold"}]}]
///         }]
///     }"#)
///     .unwrap();
/// assert_eq!(html, "<p><b>Hi</b></p>");
/// ```
#[derive(Clone, Debug)]
pub struct Resolver<S: TagSerializer = HtmlSerializer> {
    schema: Schema,
    serializer: S,
    max_depth: Option<usize>,
}

impl Resolver<HtmlSerializer> {
    /// Create a resolver with the default schema and the standard serializer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: Schema::default(),
            serializer: HtmlSerializer::new(),
            max_depth: None,
        }
    }
}

impl Default for Resolver<HtmlSerializer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TagSerializer> Resolver<S> {
    /// Replace the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Replace the tag serializer.
    #[must_use]
    pub fn with_serializer<T: TagSerializer>(self, serializer: T) -> Resolver<T> {
        Resolver {
            schema: self.schema,
            serializer,
            max_depth: self.max_depth,
        }
    }

    /// Fail with [`RenderError::DepthExceeded`] when nodes nest deeper than `limit`.
    ///
    /// Children of the document root are at depth 1. Unlimited by default.
    #[must_use]
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// The schema in use.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The tag serializer in use.
    #[must_use]
    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Render a document root to HTML.
    ///
    /// The root must have a `content` sequence; its own type and marks are
    /// not rendered.
    pub fn render(&self, document: &Node) -> Result<String, RenderError> {
        let content = document
            .content
            .as_ref()
            .ok_or(RenderError::MissingContent)?;

        let mut out = String::new();
        for node in content {
            self.render_node(node, 1, &mut out)?;
        }

        tracing::debug!(nodes = content.len(), bytes = out.len(), "Rendered document");
        Ok(out)
    }

    /// Render a document given as a JSON value.
    pub fn render_value(&self, document: &Value) -> Result<String, RenderError> {
        let document = Node::deserialize(document)?;
        self.render(&document)
    }

    /// Render a document given as JSON text.
    pub fn render_json(&self, json: &str) -> Result<String, RenderError> {
        let document: Node = serde_json::from_str(json)?;
        self.render(&document)
    }

    fn render_node(&self, node: &Node, depth: usize, out: &mut String) -> Result<(), RenderError> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(RenderError::DepthExceeded { limit });
            }
        }

        let marks = self.resolve_marks(node);
        for mark in &marks {
            self.serializer.opening_tag(mark, out)?;
        }

        let descriptor = self.schema.resolve_node(node);
        if descriptor.is_none() {
            tracing::trace!(kind = %node.kind, "No resolver for node type");
        }
        let paired = descriptor.as_ref().and_then(TagDescriptor::paired);

        if let Some(tags) = paired {
            self.serializer.opening_tag(tags, out)?;
        }

        if let Some(children) = &node.content {
            for child in children {
                self.render_node(child, depth + 1, out)?;
            }
        } else if let Some(text) = &node.text {
            self.serializer.escape(text, out);
        } else {
            match &descriptor {
                Some(TagDescriptor::SingleTag(tags)) => self.serializer.single_tag(tags, out)?,
                Some(TagDescriptor::Html(html)) => out.push_str(html),
                Some(TagDescriptor::Tag(_)) | None => {}
            }
        }

        if let Some(tags) = paired {
            self.serializer.closing_tag(tags, out);
        }

        for mark in marks.iter().rev() {
            self.serializer.closing_tag(mark, out);
        }

        Ok(())
    }

    /// Paired tags of the node's resolvable marks, in list order.
    ///
    /// Marks only wrap; a mark resolving to a self-closing tag or raw HTML
    /// is skipped like an unknown one.
    fn resolve_marks(&self, node: &Node) -> Vec<Vec<TagElement>> {
        let Some(marks) = &node.marks else {
            return Vec::new();
        };
        marks
            .iter()
            .filter_map(|mark| match self.schema.resolve_mark(mark) {
                Some(TagDescriptor::Tag(tags)) => Some(tags),
                Some(TagDescriptor::SingleTag(_) | TagDescriptor::Html(_)) => {
                    tracing::trace!(kind = %mark.kind, "Mark does not resolve to a paired tag");
                    None
                }
                None => {
                    tracing::trace!(kind = %mark.kind, "No resolver for mark type");
                    None
                }
            })
            .collect()
    }
}
