//! Build and destructure JSON-shaped message trees from flat token streams.
//!
//! Messages exchanged with a language server are small nested objects. This
//! crate writes them the way they read on paper, as one flat sequence of
//! keys, values and structural markers:
//!
//! ```
//! use tokentree::tree;
//!
//! let position = tree!(
//!     "textDocument", "{",
//!         "uri", "file:///src/main.rs",
//!     "}",
//!     "position", "{",
//!         "line", 41,
//!         "character", 7,
//!     "}",
//! );
//! assert_eq!(
//!     position.to_string(),
//!     r#"{"textDocument":{"uri":"file:///src/main.rs"},"position":{"line":41,"character":7}}"#,
//! );
//! ```
//!
//! and reads replies back with a pattern of the same shape whose typed
//! tokens point at caller-owned output slots:
//!
//! ```
//! use tokentree::{extract, tree};
//!
//! let reply = tree!("jsonrpc", "2.0", "id", 7, "result", "{", "isIncomplete", false, "}");
//! let mut id = 0i64;
//! let mut incomplete = true;
//! assert!(extract!(
//!     &reply,
//!     "jsonrpc", "2.0",
//!     "id", &mut id,
//!     "result", "{", "isIncomplete", &mut incomplete, "}",
//! ));
//! assert_eq!((id, incomplete), (7, false));
//! ```
//!
//! # Tokens
//!
//! A raw string (`&str`, [`Put::Raw`], [`Get::Raw`]) means different things
//! by position. If its first character is `{`, `}`, `[` or `]` it opens or
//! closes a container. Otherwise it is an object key in key position, and in
//! value position a string value (when building) or an equality assertion on
//! a string (when extracting). Typed tokens ([`Put::String`], [`Get::Integer`],
//! ...) carry a [`Discriminant`] and are never read as markers.
//!
//! # Errors
//!
//! A malformed stream ([`ProtocolError`]) is a bug at the call site: the
//! plain entry points panic with its message. A tree that does not have the
//! shape a pattern expects is ordinary data ([`Mismatch`]): [`extract`]
//! returns `false`. The `try_*` variants return both as errors.
//!
//! # Backends
//!
//! Trees are built through [`TreeFactory`] and read through [`TreeView`].
//! Both are implemented for the crate's own [`Node`] and, with the
//! `serde_json` feature, for [`serde_json::Value`].

mod backend;
mod builder;
mod classify;
mod codec;
mod error;
mod extract;
mod node;
mod options;
mod token;

#[cfg(test)]
mod tests;

pub use backend::{Tree, TreeFactory, TreeView};
pub use codec::{
    Codec, build, extract, extract_array, try_build, try_extract, try_extract_array,
};
pub use error::{ExtractError, Mismatch, ProtocolError};
pub use extract::ArrayCursor;
pub use node::{Array, Map, Node, NodeKind};
pub use options::{CodecOptions, DEFAULT_MAX_DEPTH, ScalarMismatch};
pub use token::{Discriminant, Get, Put, TokenKind};

/// Builds a [`Node`] object from a heterogeneous list of tokens.
///
/// Every argument is converted with [`Put::from`]: string slices become raw
/// tokens, integers, floats, booleans and `()` become typed values, and any
/// explicit [`Put`] is passed through.
///
/// ```rust
/// # use tokentree::{Node, tree};
/// let node = tree!("items", "[", 1, 2.5, true, (), "]");
/// assert_eq!(node.to_string(), r#"{"items":[1,2.5,true,null]}"#);
/// assert_eq!(tree!(), Node::Object(Default::default()));
/// ```
///
/// # Panics
///
/// Panics if the token list is malformed.
#[macro_export]
macro_rules! tree {
    ( $( $token:expr ),* $(,)? ) => {
        $crate::build::<$crate::Node, _>([$($crate::Put::<$crate::Node>::from($token)),*])
    };
}

/// Matches a pattern against a tree with the default options.
///
/// The first argument is a reference to the tree; every further argument is
/// converted with [`Get::from`]. Evaluates to `true` on a match.
///
/// ```rust
/// # use tokentree::{extract, tree};
/// let node = tree!("kind", "markdown", "value", "**x**");
/// let mut value = "";
/// assert!(extract!(&node, "kind", "markdown", "value", &mut value));
/// assert_eq!(value, "**x**");
/// assert!(!extract!(&node, "kind", "plaintext"));
/// ```
///
/// # Panics
///
/// Panics if the pattern is malformed.
#[macro_export]
macro_rules! extract {
    ( $node:expr $( , $pattern:expr )* $(,)? ) => {
        $crate::extract($node, [$($crate::Get::from($pattern)),*])
    };
}
