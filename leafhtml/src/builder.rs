//! Implements a builder DSL for assembling node trees through a series of methods.

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::attribute::collect_attributes;
use crate::{Attribute, Container, IntoAttribute, Leaf, Node, NodeError};

/// The body of an element: either the value of a leaf or the children of a container.
#[derive(Debug)]
pub enum Body<'bump> {
    /// A leaf value.
    Value(BumpString<'bump>),
    /// Container children.
    Children(BumpVec<'bump, Node<'bump>>),
}

/// Trait for types that can be converted into a [Body] with a bump allocator.
pub trait IntoBody<'bump> {
    /// Convert this value into a Body using the given bump allocator.
    fn into_body(self, bump: &'bump Bump) -> Body<'bump>;
}
impl<'bump> IntoBody<'bump> for &str {
    fn into_body(self, bump: &'bump Bump) -> Body<'bump> {
        Body::Value(BumpString::from_str_in(self, bump))
    }
}
impl<'bump> IntoBody<'bump> for String {
    fn into_body(self, bump: &'bump Bump) -> Body<'bump> {
        Body::Value(BumpString::from_str_in(&self, bump))
    }
}
impl<'bump> IntoBody<'bump> for &String {
    fn into_body(self, bump: &'bump Bump) -> Body<'bump> {
        Body::Value(BumpString::from_str_in(self, bump))
    }
}
impl<'bump> IntoBody<'bump> for Node<'bump> {
    fn into_body(self, bump: &'bump Bump) -> Body<'bump> {
        let mut v = BumpVec::with_capacity_in(1, bump);
        v.push(self);
        Body::Children(v)
    }
}
impl<'bump, const N: usize> IntoBody<'bump> for [Node<'bump>; N] {
    fn into_body(self, bump: &'bump Bump) -> Body<'bump> {
        Body::Children(BumpVec::from_iter_in(self, bump))
    }
}
impl<'bump> IntoBody<'bump> for Vec<Node<'bump>> {
    fn into_body(self, bump: &'bump Bump) -> Body<'bump> {
        Body::Children(BumpVec::from_iter_in(self, bump))
    }
}
impl<'bump> IntoBody<'bump> for BumpVec<'bump, Node<'bump>> {
    fn into_body(self, _bump: &'bump Bump) -> Body<'bump> {
        Body::Children(self)
    }
}

/// A builder for creating nodes using a bump allocator.
///
/// # Example
///
/// ```
/// use leafhtml::{bumpalo::Bump, builder::Builder};
///
/// let bump = Bump::new();
/// let b = Builder::new(&bump);
/// let node = b.p([b.attr(("class", "intro"))])([
///     b.b([])("Hello")?,
///     b.text(", World!"),
/// ])?;
/// assert_eq!(
///     node.render().unwrap(),
///     r#"<p class="intro"><b>Hello</b>, World!</p>"#
/// );
/// # Ok::<(), leafhtml::NodeError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Builder<'bump> {
    bump: &'bump Bump,
}
impl<'bump> Builder<'bump> {
    /// Create a new builder with the given bump allocator.
    pub fn new(bump: &'bump Bump) -> Self {
        Self { bump }
    }

    /// Get a reference to the bump allocator.
    pub fn bump(&self) -> &'bump Bump {
        self.bump
    }

    /// Create an attribute from a value that implements [IntoAttribute].
    pub fn attr(&self, value: impl IntoAttribute<'bump>) -> Attribute<'bump> {
        value.into_attribute(self.bump)
    }

    /// Create an untagged leaf from a string. It renders as the string alone.
    pub fn text(&self, text: &str) -> Node<'bump> {
        Node::Leaf(Leaf::raw(self.bump, text))
    }

    /// Create a tagged node from a name and attributes.
    ///
    /// The body is passed in as a single argument to the returned function. A string
    /// body produces a [Leaf]; a node or list of nodes produces a [Container], which
    /// fails with [NodeError::EmptyChildren] if the list is empty.
    ///
    /// An empty name produces an untagged leaf for a string body, and fails with
    /// [NodeError::MissingTag] for a container.
    pub fn tag<B: IntoBody<'bump>>(
        &self,
        name: &str,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> impl FnOnce(B) -> Result<Node<'bump>, NodeError> {
        let bump = self.bump;
        let name = BumpString::from_str_in(name, bump);
        let attributes = collect_attributes(bump, attributes);

        move |body: B| {
            let attributes = (!attributes.is_empty()).then_some(attributes);
            match body.into_body(bump) {
                Body::Value(value) => Ok(Node::Leaf(Leaf {
                    tag: (!name.is_empty()).then_some(name),
                    value: Some(value),
                    attributes,
                })),
                Body::Children(children) => {
                    let mut container = Container::new(bump, Some(name.as_str()), Some(children))?;
                    container.attributes = attributes;
                    Ok(Node::Container(container))
                }
            }
        }
    }

    /// Create a container from an iterator of children.
    pub fn container(
        &self,
        name: &str,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
        children: impl IntoIterator<Item = Node<'bump>>,
    ) -> Result<Node<'bump>, NodeError> {
        self.tag(name, attributes)(BumpVec::from_iter_in(children, self.bump))
    }
}

macro_rules! tag_builders {
    ($($tag_ident:ident),*) => {
        impl<'bump> Builder<'bump> {
            $(
                #[doc = concat!("Create a node with the tag name `", stringify!($tag_ident), "` and a list of attributes.\n\nThe body is passed in as a single argument to the returned function.")]
                pub fn $tag_ident<B: IntoBody<'bump>>(
                    &self,
                    attributes: impl IntoIterator<Item = Attribute<'bump>>,
                ) -> impl FnOnce(B) -> Result<Node<'bump>, NodeError> {
                    self.tag(stringify!($tag_ident), attributes)
                }
            )*
        }
        /// A list of all tags with a dedicated builder method.
        pub const ALL_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
tag_builders! {
    p, div, span, b, i, em, strong, code, pre, a, img,
    ol, ul, li, blockquote, h1, h2, h3, h4, h5, h6,
    small, sup, sub, q, s, section, article, header, footer
}
