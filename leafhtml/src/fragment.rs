//! Conversion of classified inline text fragments into leaf nodes.

use std::fmt;
use std::str::FromStr;

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{Attribute, ConvertError, Leaf, Node};

/// The kind of an inline text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FragmentKind {
    /// Plain text, rendered without markup.
    Text,
    /// Bold text, rendered as `<b>`.
    Bold,
    /// Italic text, rendered as `<i>`.
    Italic,
    /// Inline code, rendered as `<code>`.
    Code,
    /// A hyperlink, rendered as `<a href>`.
    Link,
    /// An image, rendered as `<img src alt>`.
    Image,
}
impl FragmentKind {
    /// Every fragment kind, in declaration order.
    pub const ALL: [FragmentKind; 6] = [
        FragmentKind::Text,
        FragmentKind::Bold,
        FragmentKind::Italic,
        FragmentKind::Code,
        FragmentKind::Link,
        FragmentKind::Image,
    ];

    /// The name of the kind, as accepted by [FragmentKind::from_str].
    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKind::Text => "text",
            FragmentKind::Bold => "bold",
            FragmentKind::Italic => "italic",
            FragmentKind::Code => "code",
            FragmentKind::Link => "link",
            FragmentKind::Image => "image",
        }
    }
}
impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for FragmentKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FragmentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConvertError::UnhandledKind(s.to_string()))
    }
}

/// A classified unit of inline text awaiting conversion to a [Leaf].
///
/// Two fragments are equal when their text, kind and url are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fragment {
    /// The text of the fragment. For images, this is the alt text.
    pub text: Option<String>,
    /// The kind of the fragment.
    pub kind: FragmentKind,
    /// The target of a link, or the source of an image.
    #[cfg_attr(feature = "serde", serde(default))]
    pub url: Option<String>,
}
impl Fragment {
    /// Create a fragment without a url.
    pub fn new(text: impl Into<String>, kind: FragmentKind) -> Self {
        Fragment {
            text: Some(text.into()),
            kind,
            url: None,
        }
    }

    /// Set the url of the fragment.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Create a plain text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, FragmentKind::Text)
    }

    /// Create a bold fragment.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, FragmentKind::Bold)
    }

    /// Create an italic fragment.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, FragmentKind::Italic)
    }

    /// Create an inline code fragment.
    pub fn code(text: impl Into<String>) -> Self {
        Self::new(text, FragmentKind::Code)
    }

    /// Create a link fragment.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, FragmentKind::Link).with_url(url)
    }

    /// Create an image fragment. `alt` becomes the `alt` attribute of the image.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(alt, FragmentKind::Image).with_url(url)
    }
}

/// A fragment whose kind has not yet been resolved to a [FragmentKind].
///
/// This is the shape fragments take when they arrive from outside the type system,
/// such as deserialized input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFragment {
    /// The text of the fragment.
    pub text: Option<String>,
    /// The name of the fragment kind.
    pub kind: String,
    /// The url of the fragment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub url: Option<String>,
}
impl TryFrom<RawFragment> for Fragment {
    type Error = ConvertError;

    fn try_from(raw: RawFragment) -> Result<Self, Self::Error> {
        Ok(Fragment {
            kind: raw.kind.parse()?,
            text: raw.text,
            url: raw.url,
        })
    }
}

/// Convert a fragment into a leaf node.
///
/// | Kind   | Tag    | Value | Attributes     |
/// |--------|--------|-------|----------------|
/// | Text   | none   | text  | none           |
/// | Bold   | `b`    | text  | none           |
/// | Italic | `i`    | text  | none           |
/// | Code   | `code` | text  | none           |
/// | Link   | `a`    | text  | `href`         |
/// | Image  | `img`  | `""`  | `src`, `alt`   |
///
/// Links require a url and fail with [ConvertError::MissingUrl] otherwise. Images
/// require both a url and text, and fail with [ConvertError::MissingAltOrUrl]
/// otherwise. Both checks happen before any node is built.
pub fn convert<'bump>(bump: &'bump Bump, fragment: &Fragment) -> Result<Leaf<'bump>, ConvertError> {
    tracing::trace!(kind = %fragment.kind, "converting fragment");
    let result = convert_inner(bump, fragment);
    if let Err(e) = &result {
        tracing::debug!(kind = %fragment.kind, error = %e, "failed to convert fragment");
    }
    result
}

fn convert_inner<'bump>(
    bump: &'bump Bump,
    fragment: &Fragment,
) -> Result<Leaf<'bump>, ConvertError> {
    let text = fragment.text.as_deref();
    let leaf = match fragment.kind {
        FragmentKind::Text => Leaf::new(bump, None, text)?,
        FragmentKind::Bold => Leaf::new(bump, Some("b"), text)?,
        FragmentKind::Italic => Leaf::new(bump, Some("i"), text)?,
        FragmentKind::Code => Leaf::new(bump, Some("code"), text)?,
        FragmentKind::Link => {
            let url = fragment.url.as_deref().ok_or(ConvertError::MissingUrl)?;
            Leaf::new(bump, Some("a"), text)?
                .with_attributes(bump, [Attribute::new(bump, "href", url)])
        }
        FragmentKind::Image => {
            let (Some(url), Some(alt)) = (fragment.url.as_deref(), text) else {
                return Err(ConvertError::MissingAltOrUrl);
            };
            Leaf::new(bump, Some("img"), Some(""))?.with_attributes(
                bump,
                [Attribute::new(bump, "src", url), Attribute::new(bump, "alt", alt)],
            )
        }
    };
    Ok(leaf)
}

/// Convert a fragment whose kind is given by name.
///
/// Names outside the recognised set fail with [ConvertError::UnhandledKind], which
/// carries the offending name.
pub fn convert_raw<'bump>(
    bump: &'bump Bump,
    fragment: &RawFragment,
) -> Result<Leaf<'bump>, ConvertError> {
    let fragment = Fragment::try_from(fragment.clone()).inspect_err(|e| {
        tracing::debug!(kind = %fragment.kind, error = %e, "failed to resolve fragment kind");
    })?;
    convert(bump, &fragment)
}

/// Convert a sequence of fragments into nodes, stopping at the first failure.
pub fn convert_all<'a, 'bump>(
    bump: &'bump Bump,
    fragments: impl IntoIterator<Item = &'a Fragment>,
) -> Result<BumpVec<'bump, Node<'bump>>, ConvertError> {
    let mut result = BumpVec::new_in(bump);
    for fragment in fragments {
        result.push(Node::Leaf(convert(bump, fragment)?));
    }
    Ok(result)
}
