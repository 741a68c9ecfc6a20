//! Reading vnode trees from JSON.
//!
//! Objects shaped `{"tag", "attrs", "children"}` are elements (other keys are
//! ignored), `{"trusted": "..."}` is trusted markup and any other object is an
//! attribute map. This is the same shape [`VNode`] serializes to.

use crate::builder::{build_element, normalize_children, number_to_text, Arg};
use crate::selector::Selector;
use crate::vdom::{trust, AttrValue, Attrs, VNode};
use serde_json::{Map, Value};
use tracing::warn;

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Arg::Null,
            Value::Bool(value) => Arg::Bool(value),
            Value::Number(number) => Arg::Text(number_to_text(&number)),
            Value::String(text) => Arg::Text(text),
            Value::Array(items) => Arg::List(items.into_iter().map(Arg::from).collect()),
            Value::Object(map) => object_to_arg(map),
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttrValue::Null,
            Value::Bool(value) => AttrValue::Bool(value),
            Value::Number(number) => AttrValue::Number(number),
            Value::String(text) => AttrValue::Str(text),
            Value::Array(items) if items.iter().all(Value::is_string) => AttrValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text),
                        _ => None,
                    })
                    .collect(),
            ),
            other => AttrValue::Unsupported(other),
        }
    }
}

/// Normalize any JSON value into root nodes.
pub fn nodes_from_json(value: Value) -> Vec<VNode> {
    normalize_children([Arg::from(value)])
}

pub fn is_vnode_shape(map: &Map<String, Value>) -> bool {
    matches!(map.get("tag"), Some(Value::String(_)))
        && map.contains_key("attrs")
        && map.contains_key("children")
}

fn is_trusted_shape(map: &Map<String, Value>) -> bool {
    map.len() == 1 && matches!(map.get("trusted"), Some(Value::String(_)))
}

fn object_to_arg(mut map: Map<String, Value>) -> Arg {
    if is_trusted_shape(&map) {
        return match map.remove("trusted") {
            Some(Value::String(raw)) => Arg::from(trust(raw)),
            _ => Arg::Null,
        };
    }
    if is_vnode_shape(&map) {
        return Arg::Node(element_from_json(map));
    }
    Arg::Attrs(attrs_from_json(map))
}

fn attrs_from_json(map: Map<String, Value>) -> Attrs {
    map.into_iter()
        .map(|(name, value)| (name, AttrValue::from(value)))
        .collect()
}

fn element_from_json(mut map: Map<String, Value>) -> VNode {
    let tag = match map.remove("tag") {
        Some(Value::String(tag)) => tag,
        _ => String::new(),
    };
    let attrs = match map.remove("attrs") {
        Some(Value::Object(attrs)) => attrs_from_json(attrs),
        Some(Value::Null) | None => Attrs::new(),
        Some(other) => {
            warn!(tag = %tag, found = %other, "Ignoring non-mapping attrs");
            Attrs::new()
        }
    };
    let children = map.remove("children").map(Arg::from).unwrap_or(Arg::Null);

    build_element(Selector::parse(&tag), [Arg::Attrs(attrs), children]).into()
}
