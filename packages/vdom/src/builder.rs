//! `build(selector, attrs?, children...)` and the child normalizer.

use crate::error::SelectorResult;
use crate::selector::Selector;
use crate::vdom::{AttrValue, Attrs, Element, Trusted, VNode};
use tracing::warn;

/// One positional argument to [`build`].
///
/// A leading `Attrs` is taken as the attribute map. Everything else, in any
/// position, is a child.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Dropped (conditional inclusion)
    Null,
    /// `false` is dropped, `true` becomes the text `"true"`
    Bool(bool),
    Text(String),
    Node(VNode),
    /// Flattened to any depth
    List(Vec<Arg>),
    Attrs(Attrs),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Text(value.clone())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

macro_rules! arg_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Text(value.to_string())
                }
            }
        )*
    };
}

arg_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Text(format_number(value))
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Text(format_number(f64::from(value)))
    }
}

impl From<VNode> for Arg {
    fn from(value: VNode) -> Self {
        Arg::Node(value)
    }
}

impl From<Trusted> for Arg {
    fn from(value: Trusted) -> Self {
        Arg::Node(VNode::Raw(value))
    }
}

impl From<Attrs> for Arg {
    fn from(value: Attrs) -> Self {
        Arg::Attrs(value)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(values: Vec<T>) -> Self {
        Arg::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Null, Into::into)
    }
}

/// Build an element from a selector, an optional leading attribute map and
/// any number of children. Never fails.
pub fn build<I>(selector: &str, args: I) -> VNode
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    build_element(Selector::parse(selector), args).into()
}

/// Like [`build`], but rejects malformed selectors.
pub fn try_build<I>(selector: &str, args: I) -> SelectorResult<VNode>
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    Ok(build_element(Selector::parse_strict(selector)?, args).into())
}

pub(crate) fn build_element<I>(selector: Selector, args: I) -> Element
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let attrs = match args.next_if(|arg| matches!(arg, Arg::Attrs(_))) {
        Some(Arg::Attrs(attrs)) => attrs,
        _ => Attrs::new(),
    };

    let Selector { tag, id, classes } = selector;
    let attrs = merge_attrs(id, classes, attrs);
    let children = normalize_children(args);

    Element::new(tag, attrs, children)
}

/// Order: selector id, explicit attributes, merged class list last.
fn merge_attrs(id: Option<String>, mut classes: Vec<String>, explicit: Attrs) -> Attrs {
    let mut merged = Attrs::new();
    let mut class_name = Vec::new();
    let mut unsupported_class = None;

    if let Some(id) = id {
        merged.insert("id", id);
    }

    for (name, value) in explicit {
        if value == AttrValue::Null {
            continue;
        }
        match name.as_str() {
            "class" => collect_classes(value, &mut classes, &mut unsupported_class),
            "className" => collect_classes(value, &mut class_name, &mut unsupported_class),
            _ => merged.insert(name, value),
        }
    }

    classes.extend(class_name);
    match unsupported_class {
        // left for the serializer to reject
        Some(value) => merged.insert("class", value),
        None if !classes.is_empty() => merged.insert("class", classes),
        None => {}
    }
    merged
}

fn collect_classes(value: AttrValue, into: &mut Vec<String>, unsupported: &mut Option<AttrValue>) {
    match value {
        AttrValue::List(entries) => into.extend(
            entries
                .into_iter()
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty()),
        ),
        AttrValue::Str(entries) => into.extend(entries.split_whitespace().map(String::from)),
        AttrValue::Null => {}
        AttrValue::Bool(value) => *unsupported = Some(AttrValue::Unsupported(value.into())),
        AttrValue::Number(value) => *unsupported = Some(AttrValue::Unsupported(value.into())),
        AttrValue::Unsupported(value) => *unsupported = Some(AttrValue::Unsupported(value)),
    }
}

/// Flatten nested child arguments into leaves, dropping `null` and `false`.
/// Text is kept as-is: escaping happens when rendering.
pub fn normalize_children<I>(args: I) -> Vec<VNode>
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let mut children = Vec::new();
    for arg in args {
        push_child(arg.into(), &mut children);
    }
    children
}

fn push_child(arg: Arg, children: &mut Vec<VNode>) {
    match arg {
        Arg::Null | Arg::Bool(false) => {}
        Arg::Bool(true) => children.push(VNode::text("true")),
        Arg::Text(content) => children.push(VNode::Text(content)),
        Arg::Node(node) => children.push(node),
        Arg::List(items) => {
            for item in items {
                push_child(item, children);
            }
        }
        Arg::Attrs(attrs) => {
            warn!(attributes = attrs.len(), "Dropping attribute map in child position");
        }
    }
}

/// Number to text the way a browser prints it: integral values without a
/// fractional part.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

/// Text for a JSON number, formatted like [`format_number`] so that children
/// and attribute values print the same digits.
pub fn number_to_text(number: &serde_json::Number) -> String {
    if let Some(value) = number.as_i64() {
        value.to_string()
    } else if let Some(value) = number.as_u64() {
        value.to_string()
    } else {
        format_number(number.as_f64().unwrap_or(f64::NAN))
    }
}
