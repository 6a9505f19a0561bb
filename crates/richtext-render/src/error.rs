//! Render error types.

/// Error returned by [`Resolver`](crate::Resolver) and the tag serializer.
///
/// Every error aborts the whole render; there is no partial output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The document root has no `content` sequence.
    #[error("Malformed document: root node has no content")]
    MissingContent,
    /// An attribute value cannot be written as a scalar.
    #[error("Invalid value for attribute `{key}` on <{tag}>: expected a scalar, got {found}")]
    InvalidAttribute {
        /// Tag the attribute belongs to.
        tag: String,
        /// Attribute key.
        key: String,
        /// JSON kind of the offending value (e.g. "object").
        found: &'static str,
    },
    /// Document nesting exceeded the configured limit.
    #[error("Document nesting exceeds the maximum depth of {limit}")]
    DepthExceeded {
        /// Configured limit.
        limit: usize,
    },
    /// Input JSON could not be deserialized into a document tree.
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}
