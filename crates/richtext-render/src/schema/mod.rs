//! Schema: the mapping from node and mark types to tag descriptors.
//!
//! A [`Schema`] is a pair of string-keyed dispatch tables, one for marks and
//! one for nodes. Each entry is a pure function from the node (or mark) to a
//! [`TagDescriptor`]. Types missing from a table resolve to no descriptor,
//! which the resolver treats as "render content without a wrapper".
//!
//! [`Schema::default`] provides the standard rich-text table; callers extend
//! or replace entries with the builder methods.
//!
//! # Example
//!
//! ```
//! use richtext_render::{Node, Schema, TagDescriptor};
//!
//! let schema = Schema::default()
//!     .with_static_mark("highlight", TagDescriptor::tag("mark"))
//!     .with_node("heading", |_| TagDescriptor::tag("h2"))
//!     .without_node("image");
//!
//! assert!(schema.resolve_node(&Node::new("image")).is_none());
//! assert_eq!(
//!     schema.resolve_mark(&Node::new("highlight")),
//!     Some(TagDescriptor::tag("mark"))
//! );
//! ```

mod default;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::node::Node;
use crate::tag::TagDescriptor;

/// Resolver function for a single node or mark type.
pub type ResolveFn = Arc<dyn Fn(&Node) -> TagDescriptor + Send + Sync>;

/// Mark and node dispatch tables.
#[derive(Clone)]
pub struct Schema {
    marks: HashMap<String, ResolveFn>,
    nodes: HashMap<String, ResolveFn>,
}

impl Schema {
    /// A schema with no marks or nodes. Every type renders as passthrough.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            marks: HashMap::new(),
            nodes: HashMap::new(),
        }
    }

    /// Register (or replace) the resolver for a mark type.
    #[must_use]
    pub fn with_mark<F>(mut self, name: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&Node) -> TagDescriptor + Send + Sync + 'static,
    {
        self.marks.insert(name.into(), Arc::new(resolve));
        self
    }

    /// Register (or replace) the resolver for a node type.
    #[must_use]
    pub fn with_node<F>(mut self, name: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&Node) -> TagDescriptor + Send + Sync + 'static,
    {
        self.nodes.insert(name.into(), Arc::new(resolve));
        self
    }

    /// Register a mark type that always resolves to `descriptor`.
    #[must_use]
    pub fn with_static_mark(self, name: impl Into<String>, descriptor: TagDescriptor) -> Self {
        self.with_mark(name, move |_| descriptor.clone())
    }

    /// Register a node type that always resolves to `descriptor`.
    #[must_use]
    pub fn with_static_node(self, name: impl Into<String>, descriptor: TagDescriptor) -> Self {
        self.with_node(name, move |_| descriptor.clone())
    }

    /// Remove a mark type so it renders as passthrough.
    #[must_use]
    pub fn without_mark(mut self, name: &str) -> Self {
        self.marks.remove(name);
        self
    }

    /// Remove a node type so it renders as passthrough.
    #[must_use]
    pub fn without_node(mut self, name: &str) -> Self {
        self.nodes.remove(name);
        self
    }

    /// The mark dispatch table.
    #[must_use]
    pub fn marks(&self) -> &HashMap<String, ResolveFn> {
        &self.marks
    }

    /// The node dispatch table.
    #[must_use]
    pub fn nodes(&self) -> &HashMap<String, ResolveFn> {
        &self.nodes
    }

    /// Resolve a mark by its type. `None` for unknown types.
    #[must_use]
    pub fn resolve_mark(&self, mark: &Node) -> Option<TagDescriptor> {
        self.marks.get(&mark.kind).map(|resolve| resolve(mark))
    }

    /// Resolve a node by its type. `None` for unknown types.
    #[must_use]
    pub fn resolve_node(&self, node: &Node) -> Option<TagDescriptor> {
        self.nodes.get(&node.kind).map(|resolve| resolve(node))
    }

    /// Registered mark types, sorted.
    #[must_use]
    pub fn mark_names(&self) -> Vec<&str> {
        sorted_names(&self.marks)
    }

    /// Registered node types, sorted.
    #[must_use]
    pub fn node_names(&self) -> Vec<&str> {
        sorted_names(&self.nodes)
    }
}

impl Default for Schema {
    fn default() -> Self {
        default::default_schema()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("marks", &self.mark_names())
            .field("nodes", &self.node_names())
            .finish()
    }
}

fn sorted_names(table: &HashMap<String, ResolveFn>) -> Vec<&str> {
    let mut names: Vec<&str> = table.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}
