use crate::selector::DEFAULT_TAG;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

/// Elements that never have children and are written without a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VNode {
    /// HTML element
    Element(Element),

    /// Text leaf, escaped when rendered
    Text(String),

    /// Trusted markup, rendered verbatim
    Raw(Trusted),
}

impl VNode {
    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            VNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(content) => Some(content),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, VNode::Element(_))
    }
}

impl From<Element> for VNode {
    fn from(element: Element) -> Self {
        VNode::Element(element)
    }
}

impl From<Trusted> for VNode {
    fn from(trusted: Trusted) -> Self {
        VNode::Raw(trusted)
    }
}

/// An element with its merged attributes and normalized children.
///
/// Only the builder constructs elements, so the tag is never empty and a void
/// element never holds children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    tag: String,
    attrs: Attrs,
    children: Vec<VNode>,
}

impl Element {
    pub(crate) fn new(tag: impl Into<String>, attrs: Attrs, mut children: Vec<VNode>) -> Self {
        let mut tag = tag.into().to_ascii_lowercase();
        if tag.is_empty() {
            tag = DEFAULT_TAG.to_string();
        }
        if is_void(&tag) && !children.is_empty() {
            warn!(tag = %tag, dropped = children.len(), "Dropping children of void element");
            children.clear();
        }
        Self {
            tag,
            attrs,
            children,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Merged class list, empty when the element has none.
    pub fn classes(&self) -> &[String] {
        match self.attrs.get("class") {
            Some(AttrValue::List(classes)) => classes,
            _ => &[],
        }
    }

    pub fn children(&self) -> &[VNode] {
        &self.children
    }

    pub fn is_void(&self) -> bool {
        is_void(&self.tag)
    }
}

/// Markup exempt from escaping. Build one with [`trust`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trusted {
    trusted: String,
}

impl Trusted {
    pub fn as_str(&self) -> &str {
        &self.trusted
    }
}

/// Wrap pre-sanitized markup so the serializer writes it unescaped.
pub fn trust(raw_html: impl Into<String>) -> Trusted {
    Trusted {
        trusted: raw_html.into(),
    }
}

/// Attribute value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Str(String),
    /// Space-joined on render (used for `class`)
    List(Vec<String>),
    /// Shapes the serializer refuses to print, e.g. nested mappings
    Unsupported(serde_json::Value),
}

impl AttrValue {
    /// Short name of the value's shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Null => "null",
            AttrValue::Bool(_) => "boolean",
            AttrValue::Number(_) => "number",
            AttrValue::Str(_) => "string",
            AttrValue::List(_) => "string list",
            AttrValue::Unsupported(value) => match value {
                serde_json::Value::Object(_) => "mapping",
                serde_json::Value::Array(_) => "mixed array",
                serde_json::Value::Bool(_) => "boolean",
                serde_json::Value::Number(_) => "number",
                _ => "value",
            },
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

macro_rules! attr_value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::Number(serde_json::Number::from(value))
                }
            }
        )*
    };
}

attr_value_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
            return AttrValue::Number(serde_json::Number::from(value as i64));
        }
        match serde_json::Number::from_f64(value) {
            Some(number) => AttrValue::Number(number),
            None => AttrValue::Str(crate::builder::format_number(value)),
        }
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::List(value)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(value: Vec<&str>) -> Self {
        AttrValue::List(value.into_iter().map(String::from).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for AttrValue {
    fn from(value: [&'a str; N]) -> Self {
        AttrValue::List(value.into_iter().map(String::from).collect())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, Into::into)
    }
}

/// Attribute map that keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attrs(IndexMap<String, AttrValue>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value. A replaced key keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attrs(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Attrs {
    type Item = (String, AttrValue);
    type IntoIter = indexmap::map::IntoIter<String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
