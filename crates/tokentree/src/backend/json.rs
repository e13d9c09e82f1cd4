//! `serde_json::Value` as a tree backend.
//!
//! With `preserve_order`, `serde_json::Map` keeps insertion order, so objects
//! built here list their members in the order the tokens named them.

use serde_json::{Map, Number, Value};

use crate::{
    backend::{Tree, TreeFactory, TreeView},
    node::NodeKind,
};

impl Tree for Value {
    type Object = Map<String, Value>;
    type Array = Vec<Value>;
}

impl TreeFactory for Value {
    #[inline]
    fn new_null() -> Self {
        Value::Null
    }

    #[inline]
    fn new_bool(b: bool) -> Self {
        Value::Bool(b)
    }

    #[inline]
    fn new_integer(n: i64) -> Self {
        Value::Number(Number::from(n))
    }

    /// JSON has no representation for NaN or the infinities; those become
    /// `null`.
    #[inline]
    fn new_double(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }

    #[inline]
    fn new_string(s: &str) -> Self {
        Value::String(s.to_owned())
    }

    #[inline]
    fn new_object() -> Map<String, Value> {
        Map::new()
    }

    #[inline]
    fn new_array() -> Vec<Value> {
        Vec::new()
    }

    #[inline]
    fn insert_object(obj: &mut Map<String, Value>, key: String, value: Self) {
        obj.insert(key, value);
    }

    #[inline]
    fn push_array(arr: &mut Vec<Value>, value: Self) {
        arr.push(value);
    }

    #[inline]
    fn from_object(obj: Map<String, Value>) -> Self {
        Value::Object(obj)
    }

    #[inline]
    fn from_array(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl TreeView for Value {
    fn kind(node: &Self) -> NodeKind {
        match node {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Boolean,
            // Unsigned values past `i64::MAX` only fit the double accessor.
            Value::Number(n) if n.is_i64() => NodeKind::Integer,
            Value::Number(_) => NodeKind::Double,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }

    #[inline]
    fn as_bool(node: &Self) -> Option<bool> {
        node.as_bool()
    }

    #[inline]
    fn as_i64(node: &Self) -> Option<i64> {
        node.as_i64()
    }

    fn as_f64(node: &Self) -> Option<f64> {
        match node {
            Value::Number(n) if !n.is_i64() => n.as_f64(),
            _ => None,
        }
    }

    #[inline]
    fn as_str(node: &Self) -> Option<&str> {
        node.as_str()
    }

    #[inline]
    fn as_object(node: &Self) -> Option<&Map<String, Value>> {
        node.as_object()
    }

    #[inline]
    fn as_array(node: &Self) -> Option<&Vec<Value>> {
        node.as_array()
    }

    #[inline]
    fn object_get<'t>(obj: &'t Map<String, Value>, key: &str) -> Option<&'t Self> {
        obj.get(key)
    }

    #[inline]
    fn array_get(arr: &Vec<Value>, index: usize) -> Option<&Self> {
        arr.get(index)
    }

    #[inline]
    fn array_len(arr: &Vec<Value>) -> usize {
        arr.len()
    }
}
