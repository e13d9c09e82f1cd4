//! The public entry points.
//!
//! [`Codec`] carries a [`CodecOptions`] value; the free functions use
//! [`Codec::default`]. Each operation comes in two flavors:
//!
//! * `try_*` returns every failure as an error value.
//! * the plain form panics on a [`ProtocolError`], which can only come from a
//!   malformed token stream written at the call site, and reports a mismatch
//!   between pattern and tree as `false`.

use crate::{
    backend::{TreeFactory, TreeView},
    builder,
    error::{ExtractError, ProtocolError},
    extract::ArrayCursor,
    options::CodecOptions,
    token::{Get, Put},
};

/// Builds and matches trees with a fixed set of [`CodecOptions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    options: CodecOptions,
}

impl Codec {
    /// A codec using `options`.
    #[must_use]
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// The options this codec was created with.
    #[must_use]
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Builds an object from a stream of key/value tokens.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] if a key position holds anything but a raw
    /// string, if a key has no value, or if nesting exceeds
    /// [`CodecOptions::max_depth`].
    pub fn try_build<'a, T, I>(&self, tokens: I) -> Result<T, ProtocolError>
    where
        T: TreeFactory,
        I: IntoIterator<Item = Put<'a, T>>,
    {
        builder::build(tokens.into_iter(), &self.options)
    }

    /// Builds an object from a stream of key/value tokens.
    ///
    /// # Panics
    ///
    /// Panics if the stream is malformed; see [`Codec::try_build`].
    #[track_caller]
    #[must_use]
    pub fn build<'a, T, I>(&self, tokens: I) -> T
    where
        T: TreeFactory,
        I: IntoIterator<Item = Put<'a, T>>,
    {
        match self.try_build(tokens) {
            Ok(tree) => tree,
            Err(err) => protocol_violation(&err),
        }
    }

    /// Matches `patterns` against `node`, writing extracted values into the
    /// pattern's output slots.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Mismatch`] when the tree does not have the shape the
    /// pattern describes, [`ExtractError::Protocol`] when the pattern itself
    /// is malformed.
    pub fn try_extract<'p, 't, T, I>(&self, node: &'t T, patterns: I) -> Result<(), ExtractError>
    where
        't: 'p,
    T: TreeView + 't,
        I: IntoIterator<Item = Get<'p, 't, T>>,
    {
        crate::extract::extract(node, patterns.into_iter(), &self.options)
    }

    /// Matches `patterns` against `node` and reports whether it matched.
    ///
    /// Output slots read before a mismatch keep their new values.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is malformed.
    #[track_caller]
    pub fn extract<'p, 't, T, I>(&self, node: &'t T, patterns: I) -> bool
    where
        't: 'p,
    T: TreeView + 't,
        I: IntoIterator<Item = Get<'p, 't, T>>,
    {
        settle(self.try_extract(node, patterns))
    }

    /// Matches `patterns` positionally against the unconsumed elements of
    /// `cursor`, advancing it past every element consumed, including on
    /// failure.
    ///
    /// # Errors
    ///
    /// As for [`Codec::try_extract`].
    pub fn try_extract_array<'p, 't, T, I>(
        &self,
        cursor: &mut ArrayCursor<'t, T>,
        patterns: I,
    ) -> Result<(), ExtractError>
    where
        't: 'p,
    T: TreeView + 't,
        I: IntoIterator<Item = Get<'p, 't, T>>,
    {
        crate::extract::extract_array(cursor, patterns.into_iter(), &self.options)
    }

    /// Matches `patterns` positionally against `cursor` and reports whether it
    /// matched.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is malformed.
    #[track_caller]
    pub fn extract_array<'p, 't, T, I>(&self, cursor: &mut ArrayCursor<'t, T>, patterns: I) -> bool
    where
        't: 'p,
    T: TreeView + 't,
        I: IntoIterator<Item = Get<'p, 't, T>>,
    {
        settle(self.try_extract_array(cursor, patterns))
    }
}

#[track_caller]
fn settle(result: Result<(), ExtractError>) -> bool {
    match result {
        Ok(()) => true,
        Err(ExtractError::Mismatch(_)) => false,
        Err(ExtractError::Protocol(err)) => protocol_violation(&err),
    }
}

#[cold]
#[track_caller]
fn protocol_violation(err: &ProtocolError) -> ! {
    panic!("malformed token stream: {err}")
}

/// Builds an object with the default options. See [`Codec::build`].
///
/// # Panics
///
/// Panics if the stream is malformed.
#[track_caller]
#[must_use]
pub fn build<'a, T, I>(tokens: I) -> T
where
    T: TreeFactory,
    I: IntoIterator<Item = Put<'a, T>>,
{
    Codec::default().build(tokens)
}

/// Builds an object with the default options. See [`Codec::try_build`].
///
/// # Errors
///
/// Returns a [`ProtocolError`] if the stream is malformed.
pub fn try_build<'a, T, I>(tokens: I) -> Result<T, ProtocolError>
where
    T: TreeFactory,
    I: IntoIterator<Item = Put<'a, T>>,
{
    Codec::default().try_build(tokens)
}

/// Matches a pattern with the default options. See [`Codec::extract`].
///
/// # Panics
///
/// Panics if the pattern is malformed.
#[track_caller]
pub fn extract<'p, 't, T, I>(node: &'t T, patterns: I) -> bool
where
    't: 'p,
    T: TreeView + 't,
    I: IntoIterator<Item = Get<'p, 't, T>>,
{
    Codec::default().extract(node, patterns)
}

/// Matches a pattern with the default options. See [`Codec::try_extract`].
///
/// # Errors
///
/// As for [`Codec::try_extract`].
pub fn try_extract<'p, 't, T, I>(node: &'t T, patterns: I) -> Result<(), ExtractError>
where
    't: 'p,
    T: TreeView + 't,
    I: IntoIterator<Item = Get<'p, 't, T>>,
{
    Codec::default().try_extract(node, patterns)
}

/// Matches array elements with the default options. See
/// [`Codec::extract_array`].
///
/// # Panics
///
/// Panics if the pattern is malformed.
#[track_caller]
pub fn extract_array<'p, 't, T, I>(cursor: &mut ArrayCursor<'t, T>, patterns: I) -> bool
where
    't: 'p,
    T: TreeView + 't,
    I: IntoIterator<Item = Get<'p, 't, T>>,
{
    Codec::default().extract_array(cursor, patterns)
}

/// Matches array elements with the default options. See
/// [`Codec::try_extract_array`].
///
/// # Errors
///
/// As for [`Codec::try_extract`].
pub fn try_extract_array<'p, 't, T, I>(
    cursor: &mut ArrayCursor<'t, T>,
    patterns: I,
) -> Result<(), ExtractError>
where
    't: 'p,
    T: TreeView + 't,
    I: IntoIterator<Item = Get<'p, 't, T>>,
{
    Codec::default().try_extract_array(cursor, patterns)
}
