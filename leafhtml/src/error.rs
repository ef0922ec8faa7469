//! Error types for node construction, rendering and fragment conversion.

/// An error raised while constructing a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// A leaf was constructed without a value.
    #[error("leaf node requires a value")]
    MissingValue,
    /// A container was constructed without a tag, or with an empty one.
    #[error("container node requires a tag")]
    MissingTag,
    /// A container was constructed without children.
    #[error("container node requires a non-empty list of children")]
    EmptyChildren,
}

/// An error raised while rendering a node tree.
///
/// Nodes are re-validated when rendered, so a tree that was valid when it was
/// constructed can still fail here if its fields were changed afterwards.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A leaf has no value.
    #[error("invalid HTML: leaf node must have a value")]
    InvalidValue,
    /// A container has no tag, or an empty one.
    #[error("invalid HTML: container node requires a tag to render")]
    InvalidTag,
    /// A container has no children.
    #[error("invalid HTML: container node requires children to render")]
    InvalidChildren,
    /// The output writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An error raised while converting a fragment into a leaf.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A link fragment has no url.
    #[error("link fragment must have a url")]
    MissingUrl,
    /// An image fragment is missing its url, its alt text, or both.
    #[error("image fragment must have both url and text for alt attribute")]
    MissingAltOrUrl,
    /// The fragment kind is not one of the recognised kinds.
    #[error("unhandled fragment kind: {0}")]
    UnhandledKind(String),
    /// The resulting leaf could not be constructed.
    #[error(transparent)]
    Node(#[from] NodeError),
}
