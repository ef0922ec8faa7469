//! Owned types that use standard heap allocation.
//!
//! These types are useful for interoperability with systems that require
//! owned data (like serde deserialization). They can be converted to
//! bump-allocated nodes using [OwnedNode::into_bump], which applies the same
//! checks as [Leaf::new] and [Container::new].

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{Attribute, Container, Leaf, Node, NodeError};

/// An owned attribute using standard heap allocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedAttribute {
    /// The key of the attribute.
    pub key: String,
    /// The value of the attribute.
    pub value: String,
}
impl OwnedAttribute {
    /// Create a new owned attribute with a key and value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        OwnedAttribute {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Convert this owned attribute into a bump-allocated attribute.
    pub fn into_bump(self, bump: &Bump) -> Attribute<'_> {
        Attribute::new(bump, &self.key, &self.value)
    }
}
impl From<(&str, &str)> for OwnedAttribute {
    fn from((key, value): (&str, &str)) -> Self {
        OwnedAttribute::new(key, value)
    }
}
impl From<(String, String)> for OwnedAttribute {
    fn from((key, value): (String, String)) -> Self {
        OwnedAttribute::new(key, value)
    }
}
impl From<&Attribute<'_>> for OwnedAttribute {
    fn from(attribute: &Attribute<'_>) -> Self {
        OwnedAttribute::new(attribute.key.as_str(), attribute.value.as_str())
    }
}

/// An owned node using standard heap allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum OwnedNode {
    /// A content node.
    Leaf {
        /// The name of the tag.
        #[cfg_attr(feature = "serde", serde(default))]
        tag: Option<String>,
        /// The value of the leaf.
        #[cfg_attr(feature = "serde", serde(default))]
        value: Option<String>,
        /// The attributes of the tag.
        #[cfg_attr(feature = "serde", serde(default))]
        attributes: Option<Vec<OwnedAttribute>>,
    },
    /// A structural node.
    Container {
        /// The name of the tag.
        #[cfg_attr(feature = "serde", serde(default))]
        tag: Option<String>,
        /// The children of the tag.
        #[cfg_attr(feature = "serde", serde(default))]
        children: Option<Vec<OwnedNode>>,
        /// The attributes of the tag.
        #[cfg_attr(feature = "serde", serde(default))]
        attributes: Option<Vec<OwnedAttribute>>,
    },
}
impl OwnedNode {
    /// Convert this owned node into a bump-allocated node.
    ///
    /// Containers are checked before their children, so a container without a tag
    /// fails with [NodeError::MissingTag] even if a descendant is also invalid.
    pub fn into_bump(self, bump: &Bump) -> Result<Node<'_>, NodeError> {
        match self {
            OwnedNode::Leaf {
                tag,
                value,
                attributes,
            } => {
                let mut leaf = Leaf::new(bump, tag.as_deref(), value.as_deref())?;
                leaf.attributes = attributes.map(|a| attributes_into_bump(bump, a));
                Ok(Node::Leaf(leaf))
            }
            OwnedNode::Container {
                tag,
                children,
                attributes,
            } => {
                if matches!(tag.as_deref(), None | Some("")) {
                    return Err(NodeError::MissingTag);
                }
                let children = match children {
                    Some(children) => {
                        let mut result = BumpVec::with_capacity_in(children.len(), bump);
                        for child in children {
                            result.push(child.into_bump(bump)?);
                        }
                        Some(result)
                    }
                    None => None,
                };
                let mut container = Container::new(bump, tag.as_deref(), children)?;
                container.attributes = attributes.map(|a| attributes_into_bump(bump, a));
                Ok(Node::Container(container))
            }
        }
    }
}
impl From<&Node<'_>> for OwnedNode {
    fn from(node: &Node<'_>) -> Self {
        let attributes: Option<Vec<OwnedAttribute>> = node
            .attributes()
            .map(|a| a.iter().map(OwnedAttribute::from).collect());
        match node {
            Node::Leaf(leaf) => OwnedNode::Leaf {
                tag: leaf.tag.as_deref().map(str::to_string),
                value: leaf.value.as_deref().map(str::to_string),
                attributes,
            },
            Node::Container(container) => OwnedNode::Container {
                tag: container.tag.as_deref().map(str::to_string),
                children: container
                    .children
                    .as_ref()
                    .map(|c| c.iter().map(OwnedNode::from).collect()),
                attributes,
            },
        }
    }
}

fn attributes_into_bump(bump: &Bump, attributes: Vec<OwnedAttribute>) -> BumpVec<'_, Attribute<'_>> {
    BumpVec::from_iter_in(attributes.into_iter().map(|a| a.into_bump(bump)), bump)
}
