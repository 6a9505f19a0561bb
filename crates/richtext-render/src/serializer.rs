//! Tag serialization.
//!
//! Turns resolved [`TagElement`] sequences into opening, self-closing and
//! closing HTML fragments. The serializer is a trait so callers can swap in
//! their own output conventions; [`HtmlSerializer`] is the standard one.

use std::fmt::Write;

use serde_json::Value;

use crate::error::RenderError;
use crate::tag::TagElement;

/// Backend trait for writing tag fragments.
///
/// All methods append to `out`. Elements are written in sequence order for
/// opening and self-closing fragments and in reverse order for closing ones,
/// so a sequence like `["pre", "code"]` nests as `<pre><code>...</code></pre>`.
pub trait TagSerializer {
    /// Write the opening fragment of paired tags.
    fn opening_tag(&self, tags: &[TagElement], out: &mut String) -> Result<(), RenderError>;

    /// Write self-closing tags (`<hr />`).
    fn single_tag(&self, tags: &[TagElement], out: &mut String) -> Result<(), RenderError>;

    /// Write the closing fragment of paired tags.
    fn closing_tag(&self, tags: &[TagElement], out: &mut String) {
        for tag in tags.iter().rev() {
            write!(out, "</{}>", tag.name).unwrap();
        }
    }

    /// Escape text node content.
    fn escape(&self, text: &str, out: &mut String) {
        out.push_str(&escape_html(text));
    }
}

/// Standard HTML tag serializer.
///
/// Attribute values are written verbatim unless
/// [`with_escaped_attributes`](Self::with_escaped_attributes) is enabled.
/// `null` values are omitted, empty strings are kept (`class=""`).
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlSerializer {
    escape_attributes: bool,
}

impl HtmlSerializer {
    /// Create a serializer that writes attribute values unescaped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape attribute values with the same rules as text content.
    #[must_use]
    pub fn with_escaped_attributes(mut self) -> Self {
        self.escape_attributes = true;
        self
    }

    /// Whether attribute values are escaped.
    #[must_use]
    pub fn escapes_attributes(&self) -> bool {
        self.escape_attributes
    }

    fn render_tags(
        &self,
        tags: &[TagElement],
        ending: &str,
        out: &mut String,
    ) -> Result<(), RenderError> {
        for tag in tags {
            out.push('<');
            out.push_str(&tag.name);
            for (key, value) in tag.attrs.iter().flatten() {
                let Some(text) = attribute_text(value) else {
                    if value.is_null() {
                        continue;
                    }
                    return Err(RenderError::InvalidAttribute {
                        tag: tag.name.clone(),
                        key: key.clone(),
                        found: value_kind(value),
                    });
                };
                if self.escape_attributes {
                    write!(out, r#" {key}="{}""#, escape_html(&text)).unwrap();
                } else {
                    write!(out, r#" {key}="{text}""#).unwrap();
                }
            }
            out.push_str(ending);
            out.push('>');
        }
        Ok(())
    }
}

impl TagSerializer for HtmlSerializer {
    fn opening_tag(&self, tags: &[TagElement], out: &mut String) -> Result<(), RenderError> {
        self.render_tags(tags, "", out)
    }

    fn single_tag(&self, tags: &[TagElement], out: &mut String) -> Result<(), RenderError> {
        self.render_tags(tags, " /", out)
    }
}

/// Text form of a scalar attribute value. `None` for null and structured values.
pub(crate) fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Escape `& < > " '` for use in HTML text.
///
/// # Example
///
/// ```
/// use richtext_render::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}
