//! Schema-driven HTML renderer for rich-text document trees.
//!
//! This crate turns a tree of typed [`Node`]s (typically deserialized from
//! JSON) into an HTML string. What each node and mark type becomes is decided
//! by a [`Schema`], a pair of string-keyed dispatch tables mapping type names
//! to [`TagDescriptor`]s.
//!
//! # Architecture
//!
//! - [`Schema`]: dispatch tables; [`Schema::default`] covers paragraphs,
//!   headings, lists, links, images, code blocks and basic inline marks
//! - [`TagSerializer`]: writes opening, self-closing and closing fragments;
//!   [`HtmlSerializer`] is the standard implementation
//! - [`Resolver`]: walks the tree, consults the schema and drives the serializer
//!
//! Unknown types are not errors: they render their content without a wrapper.
//!
//! # Example
//!
//! ```
//! use richtext_render::{Node, Resolver, Schema, TagDescriptor};
//!
//! let schema = Schema::default().with_static_mark("highlight", TagDescriptor::tag("mark"));
//! let doc = Node::new("doc").with_content(vec![
//!     Node::new("paragraph").with_content(vec![
//!         Node::text("Look ").with_mark(Node::new("italic")),
//!         Node::text("here").with_mark(Node::new("highlight")),
//!     ]),
//! ]);
//!
//! let html = Resolver::new().with_schema(schema).render(&doc).unwrap();
//! assert_eq!(html, "<p><i>Look </i><mark>here</mark></p>");
//! ```

mod error;
mod node;
mod resolver;
mod schema;
mod serializer;
mod tag;

pub use error::RenderError;
pub use node::{Attrs, Node};
pub use resolver::Resolver;
pub use schema::{ResolveFn, Schema};
pub use serializer::{HtmlSerializer, TagSerializer, escape_html};
pub use tag::{TagDescriptor, TagElement};
