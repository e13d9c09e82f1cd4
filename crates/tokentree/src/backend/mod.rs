//! Tree backends.
//!
//! The builder and the extractor are written once against these traits. A
//! backend names its container types through [`Tree`], constructs values
//! through [`TreeFactory`] and exposes them to the matcher through
//! [`TreeView`].

#[cfg(feature = "serde_json")]
mod json;
mod node;

use crate::node::NodeKind;

/// A tree representation with distinct object and array container types.
pub trait Tree: Sized {
    /// Members of an object node.
    type Object;
    /// Elements of an array node.
    type Array;
}

/// Abstraction over tree construction.
pub trait TreeFactory: Tree {
    /// A null node.
    fn new_null() -> Self;
    /// A boolean node.
    fn new_bool(b: bool) -> Self;
    /// An integer node.
    fn new_integer(n: i64) -> Self;
    /// A double node.
    ///
    /// Backends that cannot carry non-finite doubles may substitute null.
    fn new_double(n: f64) -> Self;
    /// A string node holding a copy of `s`.
    fn new_string(s: &str) -> Self;
    /// An empty object container.
    fn new_object() -> Self::Object;
    /// An empty array container.
    fn new_array() -> Self::Array;

    /// Inserts `value` under `key`. An existing key keeps its position and
    /// takes the new value.
    fn insert_object(obj: &mut Self::Object, key: String, value: Self);
    /// Appends `value`.
    fn push_array(arr: &mut Self::Array, value: Self);

    /// Wraps finished object members into a node.
    fn from_object(obj: Self::Object) -> Self;
    /// Wraps finished array elements into a node.
    fn from_array(arr: Self::Array) -> Self;
}

/// Read access used by the extractor.
///
/// Scalar accessors are variant-exact: an integer node is never reported as a
/// double or the other way round.
pub trait TreeView: Tree {
    /// The variant of `node`.
    fn kind(node: &Self) -> NodeKind;
    /// The payload of a boolean node.
    fn as_bool(node: &Self) -> Option<bool>;
    /// The payload of an integer node.
    fn as_i64(node: &Self) -> Option<i64>;
    /// The payload of a double node.
    fn as_f64(node: &Self) -> Option<f64>;
    /// The payload of a string node.
    fn as_str(node: &Self) -> Option<&str>;
    /// The members of an object node.
    fn as_object(node: &Self) -> Option<&Self::Object>;
    /// The elements of an array node.
    fn as_array(node: &Self) -> Option<&Self::Array>;

    /// Looks up a member by key.
    fn object_get<'t>(obj: &'t Self::Object, key: &str) -> Option<&'t Self>;
    /// Looks up an element by position.
    fn array_get(arr: &Self::Array, index: usize) -> Option<&Self>;
    /// Number of elements.
    fn array_len(arr: &Self::Array) -> usize;
}
