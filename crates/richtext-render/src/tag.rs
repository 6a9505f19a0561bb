//! Tag descriptors produced by schema resolvers.

use serde::{Deserialize, Deserializer};

use crate::node::Attrs;

/// One HTML element of a tag descriptor.
///
/// A bare name such as `"p"` is equivalent to an element without attributes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawElement")]
pub struct TagElement {
    /// Tag name, e.g. `a` or `h2`.
    pub name: String,
    /// Attributes in output order. `None` and an empty map render the same.
    pub attrs: Option<Attrs>,
}

impl TagElement {
    /// Create an element carrying attributes.
    #[must_use]
    pub fn with_attrs(name: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            name: name.into(),
            attrs: Some(attrs),
        }
    }
}

impl From<&str> for TagElement {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            attrs: None,
        }
    }
}

impl From<String> for TagElement {
    fn from(name: String) -> Self {
        Self { name, attrs: None }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawElement {
    Name(String),
    Element {
        tag: String,
        #[serde(default)]
        attrs: Option<Attrs>,
    },
}

impl From<RawElement> for TagElement {
    fn from(raw: RawElement) -> Self {
        match raw {
            RawElement::Name(name) => name.into(),
            RawElement::Element { tag, attrs } => Self { name: tag, attrs },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawElements {
    One(TagElement),
    Many(Vec<TagElement>),
}

fn deserialize_elements<'de, D>(deserializer: D) -> Result<Vec<TagElement>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawElements::deserialize(deserializer)? {
        RawElements::One(element) => vec![element],
        RawElements::Many(elements) => elements,
    })
}

/// Result of resolving a node or mark type.
///
/// Deserializes from the JSON shapes `{"tag": ...}`, `{"single_tag": ...}`
/// and `{"html": "..."}`, where the tag value is a name, an element object
/// (`{"tag": "a", "attrs": {...}}`) or a sequence of either.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagDescriptor {
    /// Paired tags wrapping the node's content, outermost first.
    Tag(#[serde(deserialize_with = "deserialize_elements")] Vec<TagElement>),
    /// Self-closing tags emitted in place of content.
    SingleTag(#[serde(deserialize_with = "deserialize_elements")] Vec<TagElement>),
    /// Raw HTML emitted verbatim.
    Html(String),
}

impl TagDescriptor {
    /// A single paired tag without attributes.
    #[must_use]
    pub fn tag(element: impl Into<TagElement>) -> Self {
        Self::Tag(vec![element.into()])
    }

    /// A sequence of paired tags, outermost first.
    #[must_use]
    pub fn tags<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<TagElement>,
    {
        Self::Tag(elements.into_iter().map(Into::into).collect())
    }

    /// A single self-closing tag.
    #[must_use]
    pub fn single_tag(element: impl Into<TagElement>) -> Self {
        Self::SingleTag(vec![element.into()])
    }

    /// Raw HTML passthrough.
    #[must_use]
    pub fn html(html: impl Into<String>) -> Self {
        Self::Html(html.into())
    }

    /// Paired elements, if this descriptor wraps content.
    #[must_use]
    pub fn paired(&self) -> Option<&[TagElement]> {
        match self {
            Self::Tag(elements) => Some(elements),
            Self::SingleTag(_) | Self::Html(_) => None,
        }
    }
}
