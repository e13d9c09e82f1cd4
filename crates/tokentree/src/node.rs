//! The document tree built by the codec.
//!
//! This module defines the [`Node`] enum, an owned JSON-shaped tree that keeps
//! integers and doubles apart and preserves object key insertion order, and
//! provides helpers for rendering it as compact JSON.

use core::fmt;

use indexmap::IndexMap;

/// Object members, in insertion order, with unique keys.
pub type Map = IndexMap<String, Node>;

/// Array elements.
pub type Array = Vec<Node>;

/// A node of a message tree.
///
/// Nodes are immutable once built: a parent exclusively owns its children and
/// there is no sharing between trees.
///
/// # Examples
///
/// ```
/// use tokentree::{Map, Node};
///
/// let mut map = Map::new();
/// map.insert("line".to_string(), Node::Integer(3));
/// let node = Node::Object(map);
/// assert_eq!(node.to_string(), r#"{"line":3}"#);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Node {
    /// A JSON `null`.
    #[default]
    Null,
    /// A JSON boolean.
    Boolean(bool),
    /// A number that was supplied as an integer.
    Integer(i64),
    /// A number that was supplied as a double.
    Double(f64),
    /// A JSON string.
    String(String),
    /// A JSON array.
    Array(Array),
    /// A JSON object.
    Object(Map),
}

/// The variant of a [`Node`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Node::Null`]
    Null,
    /// [`Node::Boolean`]
    Boolean,
    /// [`Node::Integer`]
    Integer,
    /// [`Node::Double`]
    Double,
    /// [`Node::String`]
    String,
    /// [`Node::Array`]
    Array,
    /// [`Node::Object`]
    Object,
}

impl NodeKind {
    /// Lowercase name used in diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Boolean => "boolean",
            NodeKind::Integer => "integer",
            NodeKind::Double => "double",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Node {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Array> for Node {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Node {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Node {
    /// Returns the variant of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Integer(_) => NodeKind::Integer,
            Node::Double(_) => NodeKind::Double,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    /// Returns `true` if the node is [`Null`].
    ///
    /// [`Null`]: Node::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the node is [`Boolean`].
    ///
    /// [`Boolean`]: Node::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the node is [`Integer`].
    ///
    /// [`Integer`]: Node::Integer
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the node is [`Double`].
    ///
    /// [`Double`]: Node::Double
    #[must_use]
    pub fn is_double(&self) -> bool {
        matches!(self, Self::Double(..))
    }

    /// Returns `true` if the node is [`String`].
    ///
    /// [`String`]: Node::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the node is [`Array`].
    ///
    /// [`Array`]: Node::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the node is [`Object`].
    ///
    /// [`Object`]: Node::Object
    ///
    /// # Examples
    ///
    /// ```
    /// use tokentree::tree;
    ///
    /// assert!(tree!().is_object());
    /// ```
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// The boolean payload, if this is a [`Node::Boolean`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// The integer payload, if this is a [`Node::Integer`].
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if let Self::Integer(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// The double payload, if this is a [`Node::Double`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Double(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Borrows the string payload, if this is a [`Node::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Borrows the elements, if this is a [`Node::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        if let Self::Array(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Borrows the members, if this is a [`Node::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        if let Self::Object(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Looks up `key` if this is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up element `index` if this is an array.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&Node> {
        self.as_array().and_then(|arr| arr.get(index))
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes, control characters and the Unicode line separators are
/// written as escape sequences.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Not valid inside JavaScript string literals.
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() && (c as u32) <= 0xFFFF => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

fn write_double<W: fmt::Write>(n: f64, f: &mut W) -> fmt::Result {
    if n.is_finite() {
        // `Debug` keeps a fractional part ("1.0") so doubles never read back
        // as integers.
        write!(f, "{n:?}")
    } else {
        f.write_str("null")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Node::Integer(n) => write!(f, "{n}"),
            Node::Double(n) => write_double(*n, f),
            Node::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Node::Array(arr) => {
                f.write_str("[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Node::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
