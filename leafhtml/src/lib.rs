#![deny(missing_docs)]
//! A crate for turning classified inline text fragments into HTML.
//!
//! Fragments ([Fragment]) are converted into [Leaf] nodes with [convert]. Leaves and
//! [Container]s are assembled into a tree of [Node]s, which is then rendered to a HTML
//! string with [Node::render].
//!
//! Every leaf carries a value and no children; every container carries a non-empty tag
//! and a non-empty list of children. These rules are checked when a node is created and
//! again when it is rendered, since node fields are public and may be changed in between.
//!
//! Values and attribute values are written verbatim. Nothing is escaped, so callers must
//! supply text that is already safe to embed in HTML.
//!
//! All allocations are done through a bump allocator ([bumpalo::Bump]) which must be passed
//! to all node-creating functions.
//!
//! # Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for fragments and [OwnedNode], and
//!   `Serialize` for bump-allocated nodes.
//! - `dump_tree`: `Node::dump_tree`, which prints a tree as JSON. Run the test suite with
//!   `--all-features` to cover it.
//!
//! # Example
//!
//! ```
//! use leafhtml::{bumpalo::Bump, convert_all, Container, Fragment};
//!
//! let bump = Bump::new();
//! let fragments = [
//!     Fragment::text("Read the "),
//!     Fragment::link("docs", "https://example.com/docs"),
//!     Fragment::bold("!"),
//! ];
//! let children = convert_all(&bump, &fragments).unwrap();
//! let paragraph = Container::new(&bump, Some("p"), Some(children)).unwrap();
//! assert_eq!(
//!     paragraph.render().unwrap(),
//!     r#"<p>Read the <a href="https://example.com/docs">docs</a><b>!</b></p>"#
//! );
//! ```

pub mod builder;

// Re-export bumpalo for convenience
pub use bumpalo;

mod attribute;
pub use attribute::{attr, collect_attributes, render_attributes, Attribute, IntoAttribute};

mod error;
pub use error::{ConvertError, NodeError, RenderError};

mod fragment;
pub use fragment::{convert, convert_all, convert_raw, Fragment, FragmentKind, RawFragment};

mod node;
pub use node::{Container, Leaf, Node};

mod owned;
pub use owned::{OwnedAttribute, OwnedNode};
