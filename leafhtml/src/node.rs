use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::attribute::{collect_attributes, push_attributes, render_attributes, set_attribute};
use crate::{Attribute, NodeError, RenderError};

/// A content node: an optional tag wrapped around a value, with no children.
///
/// The fields are public and may be changed after construction. Rendering checks the
/// node again, so a leaf whose value has been cleared fails with [RenderError::InvalidValue].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Leaf<'bump> {
    /// The name of the tag. If absent, the value is rendered without markup.
    pub tag: Option<BumpString<'bump>>,
    /// The value of the leaf.
    pub value: Option<BumpString<'bump>>,
    /// The attributes of the tag.
    pub attributes: Option<BumpVec<'bump, Attribute<'bump>>>,
}
impl<'bump> Leaf<'bump> {
    /// Create a new leaf with no attributes.
    ///
    /// Fails with [NodeError::MissingValue] if `value` is `None`.
    pub fn new(bump: &'bump Bump, tag: Option<&str>, value: Option<&str>) -> Result<Self, NodeError> {
        let value = value.ok_or(NodeError::MissingValue)?;
        Ok(Leaf {
            tag: tag.map(|t| BumpString::from_str_in(t, bump)),
            value: Some(BumpString::from_str_in(value, bump)),
            attributes: None,
        })
    }

    /// Create an untagged leaf that renders as its value alone.
    pub fn raw(bump: &'bump Bump, value: &str) -> Self {
        Leaf {
            tag: None,
            value: Some(BumpString::from_str_in(value, bump)),
            attributes: None,
        }
    }

    /// Replace the attributes of the leaf.
    pub fn with_attributes(
        mut self,
        bump: &'bump Bump,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> Self {
        self.attributes = Some(collect_attributes(bump, attributes));
        self
    }

    /// Set a single attribute, replacing the value of an existing key.
    pub fn set_attribute(&mut self, bump: &'bump Bump, key: &str, value: &str) {
        set_attribute(bump, &mut self.attributes, key, value);
    }

    /// Render the attributes of the leaf. See [render_attributes].
    pub fn render_attributes(&self) -> String {
        render_attributes(self.attributes.as_deref())
    }

    /// Render the leaf to a HTML string.
    pub fn render(&self) -> Result<String, RenderError> {
        render_to_string(|output| self.render_into(output))
    }

    fn render_into(&self, output: &mut String) -> Result<(), RenderError> {
        let value = self.value.as_deref().ok_or(RenderError::InvalidValue)?;
        match self.tag.as_deref() {
            None => output.push_str(value),
            Some(tag) => {
                tracing::trace!(tag, "rendering leaf");
                output.push('<');
                output.push_str(tag);
                push_attributes(output, self.attributes.as_deref());
                output.push('>');
                output.push_str(value);
                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
        }
        Ok(())
    }
}

/// A structural node: a tag wrapped around an ordered, non-empty list of children.
///
/// As with [Leaf], the fields may be changed after construction and are checked
/// again when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Container<'bump> {
    /// The name of the tag.
    pub tag: Option<BumpString<'bump>>,
    /// The children of the tag.
    pub children: Option<BumpVec<'bump, Node<'bump>>>,
    /// The attributes of the tag.
    pub attributes: Option<BumpVec<'bump, Attribute<'bump>>>,
}
impl<'bump> Container<'bump> {
    /// Create a new container with no attributes.
    ///
    /// Fails with [NodeError::MissingTag] if `tag` is absent or empty, and with
    /// [NodeError::EmptyChildren] if `children` is absent or empty.
    pub fn new(
        bump: &'bump Bump,
        tag: Option<&str>,
        children: Option<BumpVec<'bump, Node<'bump>>>,
    ) -> Result<Self, NodeError> {
        let tag = tag.filter(|t| !t.is_empty()).ok_or(NodeError::MissingTag)?;
        let children = children
            .filter(|c| !c.is_empty())
            .ok_or(NodeError::EmptyChildren)?;
        Ok(Container {
            tag: Some(BumpString::from_str_in(tag, bump)),
            children: Some(children),
            attributes: None,
        })
    }

    /// Create a new container from an iterator of children.
    pub fn from_iter(
        bump: &'bump Bump,
        tag: &str,
        children: impl IntoIterator<Item = Node<'bump>>,
    ) -> Result<Self, NodeError> {
        Self::new(bump, Some(tag), Some(BumpVec::from_iter_in(children, bump)))
    }

    /// Replace the attributes of the container.
    pub fn with_attributes(
        mut self,
        bump: &'bump Bump,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> Self {
        self.attributes = Some(collect_attributes(bump, attributes));
        self
    }

    /// Set a single attribute, replacing the value of an existing key.
    pub fn set_attribute(&mut self, bump: &'bump Bump, key: &str, value: &str) {
        set_attribute(bump, &mut self.attributes, key, value);
    }

    /// Render the attributes of the container. See [render_attributes].
    pub fn render_attributes(&self) -> String {
        render_attributes(self.attributes.as_deref())
    }

    /// Render the container and all of its descendants to a HTML string.
    pub fn render(&self) -> Result<String, RenderError> {
        render_to_string(|output| self.render_into(output))
    }

    fn checked_parts(&self) -> Result<(&str, &[Node<'bump>]), RenderError> {
        let tag = self
            .tag
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(RenderError::InvalidTag)?;
        let children = self
            .children
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(RenderError::InvalidChildren)?;
        Ok((tag, children))
    }

    fn render_into(&self, output: &mut String) -> Result<(), RenderError> {
        let (tag, children) = self.checked_parts()?;
        tracing::trace!(tag, children = children.len(), "rendering container");

        output.push('<');
        output.push_str(tag);
        push_attributes(output, self.attributes.as_deref());
        output.push('>');
        for child in children {
            child.render_into(output)?;
        }
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
        Ok(())
    }
}

/// Run a renderer against a fresh buffer, discarding the buffer if it fails.
fn render_to_string(
    render_into: impl FnOnce(&mut String) -> Result<(), RenderError>,
) -> Result<String, RenderError> {
    let mut output = String::new();
    if let Err(e) = render_into(&mut output) {
        tracing::debug!(error = %e, "failed to render node");
        return Err(e);
    }
    Ok(output)
}

/// A node in an HTML tree.
///
/// Rendering recurses once per level of the tree and imposes no depth limit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Node<'bump> {
    /// A content node.
    Leaf(Leaf<'bump>),
    /// A structural node.
    Container(Container<'bump>),
}
impl<'bump> From<Leaf<'bump>> for Node<'bump> {
    fn from(leaf: Leaf<'bump>) -> Self {
        Node::Leaf(leaf)
    }
}
impl<'bump> From<Container<'bump>> for Node<'bump> {
    fn from(container: Container<'bump>) -> Self {
        Node::Container(container)
    }
}
impl<'bump> Node<'bump> {
    /// Render the node to a HTML string.
    ///
    /// Either the whole tree renders or an error is returned; partial output is discarded.
    pub fn render(&self) -> Result<String, RenderError> {
        render_to_string(|output| self.render_into(output))
    }

    fn render_into(&self, output: &mut String) -> Result<(), RenderError> {
        match self {
            Node::Leaf(leaf) => leaf.render_into(output),
            Node::Container(container) => container.render_into(output),
        }
    }

    /// Render the node and write the result to a writer.
    ///
    /// Nothing is written if the tree fails to render.
    pub fn write(&self, writer: &mut impl std::io::Write) -> Result<(), RenderError> {
        let html = self.render()?;
        writer.write_all(html.as_bytes())?;
        Ok(())
    }

    /// Check that the tree would render, without producing any output.
    pub fn validate(&self) -> Result<(), RenderError> {
        match self {
            Node::Leaf(leaf) => leaf
                .value
                .as_ref()
                .map(|_| ())
                .ok_or(RenderError::InvalidValue),
            Node::Container(container) => {
                let (_, children) = container.checked_parts()?;
                children.iter().try_for_each(Node::validate)
            }
        }
    }

    /// Render the attributes of the node. See [render_attributes].
    pub fn render_attributes(&self) -> String {
        render_attributes(self.attributes())
    }

    /// Get the tag name of the node, if it has one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag.as_deref(),
            Node::Container(container) => container.tag.as_deref(),
        }
    }

    /// Get the attributes of the node, if it has any.
    pub fn attributes(&self) -> Option<&[Attribute<'bump>]> {
        match self {
            Node::Leaf(leaf) => leaf.attributes.as_deref(),
            Node::Container(container) => container.attributes.as_deref(),
        }
    }

    /// Get the inner text of the node: the values of all leaves in document order.
    ///
    /// This will return an empty string if no inner text exists.
    pub fn inner_text(&self, bump: &'bump Bump) -> BumpString<'bump> {
        let mut result = BumpString::new_in(bump);
        self.push_inner_text(&mut result);
        result
    }

    fn push_inner_text(&self, result: &mut BumpString<'bump>) {
        match self {
            Node::Leaf(leaf) => {
                if let Some(value) = &leaf.value {
                    result.push_str(value.as_str());
                }
            }
            Node::Container(container) => {
                for child in container.children.iter().flatten() {
                    child.push_inner_text(result);
                }
            }
        }
    }

    /// Serialize the tree to pretty-printed JSON, for debugging.
    #[cfg(feature = "dump_tree")]
    pub fn dump_tree(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Returns `true` if the node is a [`Leaf`].
    ///
    /// [`Leaf`]: Node::Leaf
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(..))
    }

    /// Returns `true` if the node is a [`Container`].
    ///
    /// [`Container`]: Node::Container
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr;

    fn leaf<'bump>(bump: &'bump Bump, tag: Option<&str>, value: &str) -> Node<'bump> {
        Leaf::new(bump, tag, Some(value)).unwrap().into()
    }

    #[test]
    fn test_leaf_paragraph() {
        let bump = Bump::new();
        let node = leaf(&bump, Some("p"), "This is a paragraph of text.");
        assert_eq!(node.render().unwrap(), "<p>This is a paragraph of text.</p>");
    }

    #[test]
    fn test_leaf_link_with_attributes() {
        let bump = Bump::new();
        let node = Leaf::new(&bump, Some("a"), Some("Click me!"))
            .unwrap()
            .with_attributes(&bump, [attr(&bump, ("href", "https://www.google.com"))]);
        assert_eq!(
            node.render().unwrap(),
            r#"<a href="https://www.google.com">Click me!</a>"#
        );
    }

    #[test]
    fn test_leaf_without_tag_renders_raw_value() {
        let bump = Bump::new();
        let node = leaf(&bump, None, "This is just raw text.");
        assert_eq!(node.render().unwrap(), "This is just raw text.");
        assert_eq!(leaf(&bump, None, "").render().unwrap(), "");
    }

    #[test]
    fn test_leaf_requires_value() {
        let bump = Bump::new();
        assert_eq!(
            Leaf::new(&bump, Some("p"), None).unwrap_err(),
            NodeError::MissingValue
        );
    }

    #[test]
    fn test_leaf_cleared_value_fails_to_render() {
        let bump = Bump::new();
        let mut node = Leaf::new(&bump, Some("p"), Some("valid")).unwrap();
        node.value = None;
        assert!(matches!(node.render(), Err(RenderError::InvalidValue)));
        assert_eq!(
            node.render().unwrap_err().to_string(),
            "invalid HTML: leaf node must have a value"
        );
    }

    #[test]
    fn test_container_construction() {
        let bump = Bump::new();
        let children = BumpVec::from_iter_in(
            [leaf(&bump, Some("span"), "first"), leaf(&bump, Some("b"), "second")],
            &bump,
        );
        let node = Container::new(&bump, Some("div"), Some(children.clone()))
            .unwrap()
            .with_attributes(&bump, [attr(&bump, ("class", "container"))]);
        assert_eq!(node.tag.as_deref(), Some("div"));
        assert_eq!(node.children.as_ref(), Some(&children));
        assert_eq!(node.render_attributes(), r#" class="container""#);
    }

    #[test]
    fn test_container_construction_errors() {
        let bump = Bump::new();
        let children = || Some(BumpVec::from_iter_in([leaf(&bump, Some("span"), "x")], &bump));

        assert_eq!(
            Container::new(&bump, None, children()).unwrap_err(),
            NodeError::MissingTag
        );
        assert_eq!(
            Container::new(&bump, Some(""), children()).unwrap_err(),
            NodeError::MissingTag
        );
        assert_eq!(
            Container::new(&bump, Some("div"), None).unwrap_err(),
            NodeError::EmptyChildren
        );
        assert_eq!(
            Container::new(&bump, Some("div"), Some(BumpVec::new_in(&bump))).unwrap_err(),
            NodeError::EmptyChildren
        );
        assert_eq!(
            NodeError::EmptyChildren.to_string(),
            "container node requires a non-empty list of children"
        );
    }

    #[test]
    fn test_container_with_child() {
        let bump = Bump::new();
        let node: Node = Container::from_iter(&bump, "div", [leaf(&bump, Some("span"), "child")])
            .unwrap()
            .into();
        assert_eq!(node.render().unwrap(), "<div><span>child</span></div>");
    }

    #[test]
    fn test_container_with_grandchildren() {
        let bump = Bump::new();
        let child = Container::from_iter(&bump, "span", [leaf(&bump, Some("b"), "grandchild")])
            .unwrap();
        let node = Container::from_iter(&bump, "div", [Node::from(child)]).unwrap();
        assert_eq!(
            node.render().unwrap(),
            "<div><span><b>grandchild</b></span></div>"
        );
    }

    #[test]
    fn test_container_children_have_no_separator() {
        let bump = Bump::new();
        let node = Container::from_iter(
            &bump,
            "p",
            [
                leaf(&bump, Some("b"), "Bold text"),
                leaf(&bump, None, "Normal text"),
                leaf(&bump, Some("i"), "italic text"),
                leaf(&bump, None, "Normal text"),
            ],
        )
        .unwrap();
        assert_eq!(
            node.render().unwrap(),
            "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
        );
    }

    #[test]
    fn test_container_attributes() {
        let bump = Bump::new();
        let node = Container::from_iter(
            &bump,
            "div",
            [
                leaf(&bump, Some("span"), "Span child"),
                leaf(&bump, Some("em"), "Em child"),
            ],
        )
        .unwrap()
        .with_attributes(
            &bump,
            [
                attr(&bump, ("id", "parent-id")),
                attr(&bump, ("class", "parent-class")),
            ],
        );
        assert_eq!(
            node.render().unwrap(),
            r#"<div id="parent-id" class="parent-class"><span>Span child</span><em>Em child</em></div>"#
        );
    }

    #[test]
    fn test_container_cleared_tag_fails_to_render() {
        let bump = Bump::new();
        let mut node = Container::from_iter(&bump, "div", [leaf(&bump, Some("span"), "child")])
            .unwrap();
        node.tag = Some(BumpString::new_in(&bump));
        assert!(matches!(node.render(), Err(RenderError::InvalidTag)));
        node.tag = None;
        assert!(matches!(node.render(), Err(RenderError::InvalidTag)));
    }

    #[test]
    fn test_container_cleared_children_fail_to_render() {
        let bump = Bump::new();
        let mut node = Container::from_iter(&bump, "div", [leaf(&bump, Some("span"), "child")])
            .unwrap();
        node.children = None;
        assert!(matches!(node.render(), Err(RenderError::InvalidChildren)));

        node.children = Some(BumpVec::new_in(&bump));
        let err = node.render().unwrap_err();
        assert!(matches!(err, RenderError::InvalidChildren));
        assert_eq!(
            err.to_string(),
            "invalid HTML: container node requires children to render"
        );
    }

    #[test]
    fn test_invalid_descendant_fails_whole_tree() {
        let bump = Bump::new();
        let mut broken = Leaf::new(&bump, Some("b"), Some("x")).unwrap();
        broken.value = None;
        let inner = Container::from_iter(&bump, "span", [Node::from(broken)]).unwrap();
        let node: Node = Container::from_iter(&bump, "div", [leaf(&bump, None, "ok"), Node::from(inner)])
            .unwrap()
            .into();

        assert!(matches!(node.validate(), Err(RenderError::InvalidValue)));
        assert!(matches!(node.render(), Err(RenderError::InvalidValue)));

        let mut output = Vec::new();
        assert!(node.write(&mut output).is_err());
        assert!(output.is_empty());
    }

    #[test]
    fn test_every_entry_point_reports_the_same_error() {
        let bump = Bump::new();
        let mut broken = Leaf::new(&bump, Some("b"), Some("x")).unwrap();
        broken.value = None;
        assert!(matches!(broken.render(), Err(RenderError::InvalidValue)));
        assert!(matches!(
            Node::from(broken).render(),
            Err(RenderError::InvalidValue)
        ));

        let mut container = Container::from_iter(&bump, "div", [leaf(&bump, None, "ok")]).unwrap();
        container.children = None;
        assert!(matches!(container.render(), Err(RenderError::InvalidChildren)));
        assert!(matches!(
            Node::from(container).render(),
            Err(RenderError::InvalidChildren)
        ));
    }

    #[test]
    fn test_write_to_writer() {
        let bump = Bump::new();
        let node = leaf(&bump, Some("code"), "let x = 1;");
        let mut output = Vec::new();
        node.write(&mut output).unwrap();
        assert_eq!(output, b"<code>let x = 1;</code>");
    }

    #[test]
    fn test_render_is_deterministic() {
        let bump = Bump::new();
        let node: Node = Container::from_iter(&bump, "p", [leaf(&bump, Some("i"), "x")])
            .unwrap()
            .into();
        assert_eq!(node.render().unwrap(), node.render().unwrap());
    }

    #[test]
    fn test_accessors_and_inner_text() {
        let bump = Bump::new();
        let node: Node = Container::from_iter(
            &bump,
            "p",
            [
                leaf(&bump, Some("b"), "Bold"),
                leaf(&bump, None, " and "),
                leaf(&bump, Some("i"), "italic"),
            ],
        )
        .unwrap()
        .into();
        assert!(node.is_container());
        assert!(!node.is_leaf());
        assert_eq!(node.tag(), Some("p"));
        assert_eq!(node.attributes(), None);
        assert_eq!(node.render_attributes(), "");
        assert_eq!(node.inner_text(&bump).as_str(), "Bold and italic");
    }
}
