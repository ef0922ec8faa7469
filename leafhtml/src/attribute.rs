use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
/// A key-value pair for an HTML attribute.
pub struct Attribute<'bump> {
    /// The key of the attribute.
    pub key: BumpString<'bump>,
    /// The value of the attribute.
    pub value: BumpString<'bump>,
}

impl<'bump> Attribute<'bump> {
    /// Create a new attribute with a string key and value.
    pub fn new(bump: &'bump Bump, key: &str, value: &str) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: BumpString::from_str_in(value, bump),
        }
    }
}

/// Trait for types that can be converted into an Attribute with a bump allocator.
pub trait IntoAttribute<'bump> {
    /// Convert this value into an Attribute using the given bump allocator.
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump>;
}
impl<'bump> IntoAttribute<'bump> for Attribute<'bump> {
    fn into_attribute(self, _bump: &'bump Bump) -> Attribute<'bump> {
        self
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, &str) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::new(bump, self.0, self.1)
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, String) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::new(bump, self.0, &self.1)
    }
}
impl<'bump> IntoAttribute<'bump> for (String, String) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::new(bump, &self.0, &self.1)
    }
}

/// Convenience function for creating an attribute from a value that implements
/// [IntoAttribute].
pub fn attr<'bump>(bump: &'bump Bump, value: impl IntoAttribute<'bump>) -> Attribute<'bump> {
    value.into_attribute(bump)
}

/// Collect attributes into an attribute mapping, merging repeated keys.
///
/// A repeated key keeps the position of its first occurrence and the value of its last.
pub fn collect_attributes<'bump>(
    bump: &'bump Bump,
    attributes: impl IntoIterator<Item = Attribute<'bump>>,
) -> BumpVec<'bump, Attribute<'bump>> {
    let mut result = BumpVec::new_in(bump);
    for attribute in attributes {
        upsert(&mut result, attribute);
    }
    result
}

/// Set `key` to `value` in an optional attribute mapping, creating the mapping if absent.
pub(crate) fn set_attribute<'bump>(
    bump: &'bump Bump,
    attributes: &mut Option<BumpVec<'bump, Attribute<'bump>>>,
    key: &str,
    value: &str,
) {
    let attributes = attributes.get_or_insert_with(|| BumpVec::new_in(bump));
    upsert(attributes, Attribute::new(bump, key, value));
}

fn upsert<'bump>(attributes: &mut BumpVec<'bump, Attribute<'bump>>, attribute: Attribute<'bump>) {
    match attributes.iter_mut().find(|a| a.key == attribute.key) {
        Some(existing) => existing.value = attribute.value,
        None => attributes.push(attribute),
    }
}

/// Render an attribute mapping as it appears inside a start tag.
///
/// Returns an empty string when the mapping is absent or empty. Otherwise, each
/// pair is rendered as ` key="value"` in mapping order. Values are interpolated
/// verbatim: quotes and other special characters are not escaped.
pub fn render_attributes(attributes: Option<&[Attribute<'_>]>) -> String {
    let mut output = String::new();
    push_attributes(&mut output, attributes);
    output
}

pub(crate) fn push_attributes(output: &mut String, attributes: Option<&[Attribute<'_>]>) {
    for Attribute { key, value } in attributes.unwrap_or_default() {
        output.push(' ');
        output.push_str(key.as_str());
        output.push_str("=\"");
        output.push_str(value.as_str());
        output.push('"');
    }
}
