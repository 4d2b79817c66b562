//! Conversions between JSON documents and property trees.
//!
//! Objects map to children in document order and arrays to children keyed
//! by index (`"0"`, `"1"`, ...). Scalars become leaf values and `null` an
//! empty node. Object keys must be valid path components: an empty key or a
//! key containing `/` is a decode error. Going back, a node with children is
//! always written as an object, so arrays come back as index-keyed objects.

use serde_json::value::Value as JsonValue;
use serde_json::{Map, Number};

use valuestore_core::{Error as StoreError, Node, Path, PropertyTree, Value};

use crate::Error;

/// Build a property tree from a JSON value.
///
/// Fails with a decode error for an object key that is empty or contains
/// `/`, since no path could reach it.
pub fn from_json(json: &JsonValue) -> Result<PropertyTree, StoreError> {
    Ok(PropertyTree::from_node(node_from_json(json, &Path::root())?))
}

fn node_from_json(json: &JsonValue, path: &Path) -> Result<Node, StoreError> {
    Ok(match json {
        JsonValue::Null => Node::new(),
        JsonValue::Bool(b) => Node::with_value(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Node::with_value(i),
            None => n.as_f64().map(Node::with_value).unwrap_or_default(),
        },
        JsonValue::String(s) => Node::with_value(s.as_str()),
        JsonValue::Array(items) => {
            let mut node = Node::new();
            for (index, item) in items.iter().enumerate() {
                insert_child(&mut node, &index.to_string(), item, path)?;
            }
            node
        }
        JsonValue::Object(map) => {
            let mut node = Node::new();
            for (key, item) in map {
                insert_child(&mut node, key, item, path)?;
            }
            node
        }
    })
}

fn insert_child(
    node: &mut Node,
    key: &str,
    item: &JsonValue,
    path: &Path,
) -> Result<(), StoreError> {
    let child_path = path.try_child(key).map_err(|error| StoreError::Decode {
        message: format!("object at '{}' has an unusable key: {}", path, error),
    })?;
    let child = node_from_json(item, &child_path)?;
    *node.child_entry(key)? = child;
    Ok(())
}

/// Write a property tree as a JSON value.
///
/// Fails with an encode error for a node that holds both a value and
/// children, and for non-finite floats, neither of which JSON can express.
pub fn to_json(tree: &PropertyTree) -> Result<JsonValue, StoreError> {
    node_to_json(tree.root(), &Path::root())
}

fn node_to_json(node: &Node, path: &Path) -> Result<JsonValue, StoreError> {
    match (node.value(), node.has_children()) {
        (Some(_), true) => Err(StoreError::Encode {
            message: format!("node '{}' has both a value and children", path),
        }),
        (Some(value), false) => scalar_to_json(value, path),
        (None, true) => {
            let mut map = Map::new();
            for (key, child) in node.children() {
                map.insert(key.to_string(), node_to_json(child, &path.child(key))?);
            }
            Ok(JsonValue::Object(map))
        }
        (None, false) => Ok(JsonValue::Null),
    }
}

fn scalar_to_json(value: &Value, path: &Path) -> Result<JsonValue, StoreError> {
    Ok(match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::Number(Number::from(*i)),
        Value::Float(f) => {
            JsonValue::Number(Number::from_f64(*f).ok_or_else(|| StoreError::Encode {
                message: format!("value at '{}' is not a finite number: {}", path, f),
            })?)
        }
        Value::String(s) => JsonValue::String(s.clone()),
    })
}

/// Parse JSON text into a property tree.
pub fn parse_str(text: &str) -> Result<PropertyTree, Error> {
    let json: JsonValue = serde_json::from_str(text)?;
    Ok(from_json(&json)?)
}

/// Write a property tree as pretty-printed JSON text.
pub fn to_string_pretty(tree: &PropertyTree) -> Result<String, Error> {
    let json = to_json(tree)?;
    Ok(serde_json::to_string_pretty(&json)?)
}
