use crate::{
    backend::{Tree, TreeFactory, TreeView},
    node::{Array, Map, Node, NodeKind},
};

impl Tree for Node {
    type Object = Map;
    type Array = Array;
}

impl TreeFactory for Node {
    #[inline]
    fn new_null() -> Self {
        Node::Null
    }

    #[inline]
    fn new_bool(b: bool) -> Self {
        Node::Boolean(b)
    }

    #[inline]
    fn new_integer(n: i64) -> Self {
        Node::Integer(n)
    }

    #[inline]
    fn new_double(n: f64) -> Self {
        Node::Double(n)
    }

    #[inline]
    fn new_string(s: &str) -> Self {
        Node::String(s.to_owned())
    }

    #[inline]
    fn new_object() -> Map {
        Map::new()
    }

    #[inline]
    fn new_array() -> Array {
        Vec::new()
    }

    #[inline]
    fn insert_object(obj: &mut Map, key: String, value: Self) {
        obj.insert(key, value);
    }

    #[inline]
    fn push_array(arr: &mut Array, value: Self) {
        arr.push(value);
    }

    #[inline]
    fn from_object(obj: Map) -> Self {
        Node::Object(obj)
    }

    #[inline]
    fn from_array(arr: Array) -> Self {
        Node::Array(arr)
    }
}

impl TreeView for Node {
    #[inline]
    fn kind(node: &Self) -> NodeKind {
        node.kind()
    }

    #[inline]
    fn as_bool(node: &Self) -> Option<bool> {
        node.as_bool()
    }

    #[inline]
    fn as_i64(node: &Self) -> Option<i64> {
        node.as_i64()
    }

    #[inline]
    fn as_f64(node: &Self) -> Option<f64> {
        node.as_f64()
    }

    #[inline]
    fn as_str(node: &Self) -> Option<&str> {
        node.as_str()
    }

    #[inline]
    fn as_object(node: &Self) -> Option<&Map> {
        node.as_object()
    }

    #[inline]
    fn as_array(node: &Self) -> Option<&Array> {
        node.as_array()
    }

    #[inline]
    fn object_get<'t>(obj: &'t Map, key: &str) -> Option<&'t Self> {
        obj.get(key)
    }

    #[inline]
    fn array_get(arr: &Array, index: usize) -> Option<&Self> {
        arr.get(index)
    }

    #[inline]
    fn array_len(arr: &Array) -> usize {
        arr.len()
    }
}
