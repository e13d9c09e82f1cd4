//! Tokens accepted by the builder ([`Put`]) and the extractor ([`Get`]).
//!
//! Both streams share one grammar. A [`Put::Raw`] / [`Get::Raw`] string is
//! read by context: a raw string whose first character is `{`, `}`, `[` or `]`
//! is a structural marker, a raw string in key position is an object key, and
//! a raw string in value position is a literal (a string value when building,
//! an equality assertion when extracting). Every other variant carries an
//! explicit [`Discriminant`].
//!
//! Strings that start with a reserved character can only be stored through
//! the typed escape [`Put::String`]:
//!
//! ```
//! use tokentree::{Node, Put, tree};
//!
//! let node = tree!("open", Put::String("{"));
//! assert_eq!(node.get("open"), Some(&Node::from("{")));
//! ```

use core::fmt;

use crate::{backend::Tree, extract::ArrayCursor, node::Node};

/// The type tag of a typed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Discriminant {
    /// A string, exempt from structural interpretation.
    String,
    /// A double.
    Double,
    /// An integer.
    Integer,
    /// A boolean.
    Boolean,
    /// A null.
    Null,
    /// A subtree of any kind.
    Node,
    /// Object members.
    Object,
    /// Array elements.
    Array,
    /// An array whose elements are all strings.
    Strv,
}

impl fmt::Display for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Discriminant::String => "string",
            Discriminant::Double => "double",
            Discriminant::Integer => "integer",
            Discriminant::Boolean => "boolean",
            Discriminant::Null => "null",
            Discriminant::Node => "node",
            Discriminant::Object => "object",
            Discriminant::Array => "array",
            Discriminant::Strv => "string array",
        })
    }
}

/// How the classifier read a token, reported in protocol errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// End of the token stream.
    End,
    /// A raw string.
    Raw,
    /// A typed token.
    Typed(Discriminant),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::ObjectStart => f.write_str("\"{\""),
            TokenKind::ObjectEnd => f.write_str("\"}\""),
            TokenKind::ArrayStart => f.write_str("\"[\""),
            TokenKind::ArrayEnd => f.write_str("\"]\""),
            TokenKind::End => f.write_str("end of stream"),
            TokenKind::Raw => f.write_str("a raw string"),
            TokenKind::Typed(d) => write!(f, "a typed {d}"),
        }
    }
}

/// A token of a build stream.
///
/// Typed variants move their payload into the tree being built.
pub enum Put<'a, T: Tree = Node> {
    /// A structural marker, key, or literal string value.
    Raw(&'a str),
    /// A string value, never read as a structural marker.
    String(&'a str),
    /// A double value.
    Double(f64),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// A null value.
    Null,
    /// A prebuilt subtree, inserted as is.
    Node(T),
    /// Prebuilt object members, inserted as an object.
    Object(T::Object),
    /// Prebuilt array elements, inserted as an array.
    Array(T::Array),
    /// An array of string values.
    Strv(&'a [&'a str]),
    /// Explicit end of the stream; later tokens are never read.
    End,
}

impl<T: Tree> Put<'_, T> {
    /// The type tag, or `None` for raw strings and [`Put::End`].
    #[must_use]
    pub fn discriminant(&self) -> Option<Discriminant> {
        Some(match self {
            Put::Raw(_) | Put::End => return None,
            Put::String(_) => Discriminant::String,
            Put::Double(_) => Discriminant::Double,
            Put::Integer(_) => Discriminant::Integer,
            Put::Boolean(_) => Discriminant::Boolean,
            Put::Null => Discriminant::Null,
            Put::Node(_) => Discriminant::Node,
            Put::Object(_) => Discriminant::Object,
            Put::Array(_) => Discriminant::Array,
            Put::Strv(_) => Discriminant::Strv,
        })
    }
}

impl<'a, T: Tree> From<&'a str> for Put<'a, T> {
    fn from(s: &'a str) -> Self {
        Put::Raw(s)
    }
}

impl<'a, T: Tree> From<&'a String> for Put<'a, T> {
    fn from(s: &'a String) -> Self {
        Put::Raw(s)
    }
}

impl<T: Tree> From<bool> for Put<'_, T> {
    fn from(b: bool) -> Self {
        Put::Boolean(b)
    }
}

impl<T: Tree> From<()> for Put<'_, T> {
    fn from((): ()) -> Self {
        Put::Null
    }
}

impl<T: Tree> From<f64> for Put<'_, T> {
    fn from(n: f64) -> Self {
        Put::Double(n)
    }
}

impl<T: Tree> From<f32> for Put<'_, T> {
    fn from(n: f32) -> Self {
        Put::Double(n.into())
    }
}

// Lossless integer conversions so call sites can write `tree!("line", 3)`.
macro_rules! impl_from_int_for_put {
    ($($t:ty),*) => {
        $(
            impl<T: Tree> From<$t> for Put<'_, T> {
                fn from(n: $t) -> Self {
                    Put::Integer(n.into())
                }
            }
        )*
    };
}

impl_from_int_for_put!(i8, i16, i32, i64, u8, u16, u32);

/// A token of a pattern stream.
///
/// Output slots borrow caller-owned locations for `'p` and receive values
/// borrowed from the tree for `'t`. A slot is written as soon as its value
/// matches; a later mismatch in the same call does not restore it.
pub enum Get<'p, 't, T: Tree = Node> {
    /// A structural marker, key, or literal equality assertion.
    Raw(&'p str),
    /// Receives a string.
    String(&'p mut &'t str),
    /// Receives a double.
    Double(&'p mut f64),
    /// Receives an integer.
    Integer(&'p mut i64),
    /// Receives a boolean.
    Boolean(&'p mut bool),
    /// Matches any value and reads nothing.
    Null,
    /// Receives the subtree, whatever its kind.
    Node(&'p mut Option<&'t T>),
    /// Receives the members of an object.
    Object(&'p mut Option<&'t T::Object>),
    /// Receives a cursor over an array.
    Array(&'p mut Option<ArrayCursor<'t, T>>),
    /// Receives the elements of an array of strings.
    Strv(&'p mut Vec<&'t str>),
    /// Explicit end of the pattern; later tokens are never read.
    End,
}

impl<T: Tree> Get<'_, '_, T> {
    /// The type tag, or `None` for raw strings and [`Get::End`].
    #[must_use]
    pub fn discriminant(&self) -> Option<Discriminant> {
        Some(match self {
            Get::Raw(_) | Get::End => return None,
            Get::String(_) => Discriminant::String,
            Get::Double(_) => Discriminant::Double,
            Get::Integer(_) => Discriminant::Integer,
            Get::Boolean(_) => Discriminant::Boolean,
            Get::Null => Discriminant::Null,
            Get::Node(_) => Discriminant::Node,
            Get::Object(_) => Discriminant::Object,
            Get::Array(_) => Discriminant::Array,
            Get::Strv(_) => Discriminant::Strv,
        })
    }
}

impl<'p, T: Tree> From<&'p str> for Get<'p, '_, T> {
    fn from(s: &'p str) -> Self {
        Get::Raw(s)
    }
}

impl<'p, 't, T: Tree> From<&'p mut &'t str> for Get<'p, 't, T> {
    fn from(out: &'p mut &'t str) -> Self {
        Get::String(out)
    }
}

impl<'p, T: Tree> From<&'p mut f64> for Get<'p, '_, T> {
    fn from(out: &'p mut f64) -> Self {
        Get::Double(out)
    }
}

impl<'p, T: Tree> From<&'p mut i64> for Get<'p, '_, T> {
    fn from(out: &'p mut i64) -> Self {
        Get::Integer(out)
    }
}

impl<'p, T: Tree> From<&'p mut bool> for Get<'p, '_, T> {
    fn from(out: &'p mut bool) -> Self {
        Get::Boolean(out)
    }
}

impl<'p, 't, T: Tree> From<&'p mut Option<&'t T>> for Get<'p, 't, T> {
    fn from(out: &'p mut Option<&'t T>) -> Self {
        Get::Node(out)
    }
}

impl<'p, 't, T: Tree> From<&'p mut Option<ArrayCursor<'t, T>>> for Get<'p, 't, T> {
    fn from(out: &'p mut Option<ArrayCursor<'t, T>>) -> Self {
        Get::Array(out)
    }
}

impl<'p, 't, T: Tree> From<&'p mut Vec<&'t str>> for Get<'p, 't, T> {
    fn from(out: &'p mut Vec<&'t str>) -> Self {
        Get::Strv(out)
    }
}
