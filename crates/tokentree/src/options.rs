/// Nesting limit used by [`CodecOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// What the extractor does when a typed output slot meets a node of another
/// variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScalarMismatch {
    /// The whole match fails.
    #[default]
    Fail,
    /// The slot receives its type's default (`0`, `0.0`, `false`, `""`, an
    /// empty vector or `None`) and matching continues.
    WriteDefault,
}

/// Configuration shared by the builder and the extractor.
///
/// # Examples
///
/// ```rust
/// use tokentree::{Codec, CodecOptions, ScalarMismatch};
///
/// let codec = Codec::new(CodecOptions {
///     max_depth: 8,
///     scalar_mismatch: ScalarMismatch::WriteDefault,
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Maximum number of containers open at once, counting the top-level
    /// object. Opening one more is a protocol error, both when building and
    /// when extracting. Any value is accepted, `usize::MAX` included; the
    /// navigation stack grows on demand and is only checked against this
    /// limit.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,

    /// Policy for typed output slots whose node has a different variant.
    ///
    /// The `Null` slot matches every node regardless of this setting.
    ///
    /// # Default
    ///
    /// [`ScalarMismatch::Fail`]
    pub scalar_mismatch: ScalarMismatch,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            scalar_mismatch: ScalarMismatch::default(),
        }
    }
}
