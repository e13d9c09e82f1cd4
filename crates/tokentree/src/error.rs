use thiserror::Error;

use crate::{node::NodeKind, token::TokenKind};

/// A malformed token stream.
///
/// These are programmer errors at the call site: the panicking entry points
/// (`build`, `extract`) abort with this error's message, the `try_*` entry
/// points return it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// An object key position held something other than a raw string.
    #[error("token {position}: expected an object key, found {found}")]
    InvalidKey {
        /// Index of the offending token in the stream.
        position: usize,
        /// What was found instead.
        found: TokenKind,
    },
    /// A key was followed by a close marker or the end of the stream.
    #[error("token {position}: key \"{key}\" has no value")]
    MissingValue {
        /// Index of the offending token in the stream.
        position: usize,
        /// The key left without a value.
        key: String,
    },
    /// A close marker that cannot close the current container.
    #[error("token {position}: unbalanced {found}")]
    UnbalancedClose {
        /// Index of the offending token in the stream.
        position: usize,
        /// The close marker.
        found: TokenKind,
    },
    /// More containers were open at once than the codec allows.
    #[error("nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        /// The configured limit.
        max_depth: usize,
    },
}

/// Why a tree did not match a pattern.
///
/// A mismatch is an ordinary data condition (the peer sent something other
/// than expected) and never panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The object has no member with this key.
    #[error("missing key \"{key}\"")]
    MissingKey {
        /// The key that was looked up.
        key: String,
    },
    /// The node has a different variant than the pattern requires.
    #[error("expected {expected}, found {found}")]
    WrongKind {
        /// Variant required by the pattern.
        expected: NodeKind,
        /// Variant present in the tree.
        found: NodeKind,
    },
    /// A literal pattern did not equal the string in the tree.
    #[error("expected the string \"{expected}\"")]
    LiteralMismatch {
        /// The literal from the pattern.
        expected: String,
    },
    /// The pattern addressed an element past the end of an array.
    #[error("array index {index} is out of range")]
    IndexOutOfRange {
        /// The element index.
        index: usize,
    },
    /// The root handed to the extractor is a scalar.
    #[error("expected an object or array, found {found}")]
    NotContainer {
        /// Variant of the root.
        found: NodeKind,
    },
}

/// Error returned by the fallible extraction entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The pattern stream itself is malformed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// The tree has a different shape than the pattern.
    #[error("no match: {0}")]
    Mismatch(#[from] Mismatch),
}

impl ExtractError {
    /// Returns `true` for a data mismatch, as opposed to a malformed pattern.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }
}
