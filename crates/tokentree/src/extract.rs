//! Matches a [`Get`] pattern stream against a tree.
//!
//! The extractor walks the pattern once, left to right, keeping one
//! navigation frame per open container. It never backtracks: the first
//! mismatch ends the walk. Output slots are written as soon as their value is
//! read, so a failed match can leave earlier slots written.

use core::fmt;

use tracing::{debug, trace};

use crate::{
    backend::{Tree, TreeView},
    classify::{Class, Classifier, Slot},
    error::{ExtractError, Mismatch, ProtocolError},
    node::NodeKind,
    options::{CodecOptions, DEFAULT_MAX_DEPTH, ScalarMismatch},
    token::Get,
};

/// A position inside an array, pointing at the next unconsumed element.
///
/// Cursors are produced by [`Get::Array`] slots and consumed positionally by
/// [`extract_array`](crate::extract_array), or iterated directly.
///
/// ```
/// use tokentree::{ArrayCursor, Get, Node, extract, tree};
///
/// let node = tree!("xs", "[", 1, 2, "]");
/// let mut xs: Option<ArrayCursor<'_, Node>> = None;
/// assert!(extract(&node, [Get::from("xs"), Get::Array(&mut xs)]));
/// let total: i64 = xs.into_iter().flatten().filter_map(Node::as_i64).sum();
/// assert_eq!(total, 3);
/// ```
pub struct ArrayCursor<'t, T: Tree> {
    elements: &'t T::Array,
    position: usize,
}

impl<'t, T: Tree> ArrayCursor<'t, T> {
    /// A cursor at the first element of `elements`.
    #[must_use]
    pub fn new(elements: &'t T::Array) -> Self {
        Self {
            elements,
            position: 0,
        }
    }

    /// The whole array, including consumed elements.
    #[must_use]
    pub fn elements(&self) -> &'t T::Array {
        self.elements
    }

    /// Index of the next unconsumed element.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<T: TreeView> ArrayCursor<'_, T> {
    /// Number of elements not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        T::array_len(self.elements).saturating_sub(self.position)
    }

    /// Returns `true` once every element has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

impl<T: Tree> Clone for ArrayCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tree> Copy for ArrayCursor<'_, T> {}

impl<T: Tree> fmt::Debug for ArrayCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayCursor")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<'t, T: TreeView + 't> Iterator for ArrayCursor<'t, T> {
    type Item = &'t T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = T::array_get(self.elements, self.position)?;
        self.position += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<'t, T: TreeView + 't> ExactSizeIterator for ArrayCursor<'t, T> {}

enum Level<'t, T: Tree> {
    Object(&'t T::Object),
    Array(&'t T::Array),
}

impl<T: Tree> Clone for Level<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tree> Copy for Level<'_, T> {}

/// One open container of the navigation stack.
struct Frame<'p, 't, T: Tree> {
    level: Level<'t, T>,
    /// Key most recently matched in an object frame.
    current_key: Option<&'p str>,
    /// Next element to match in an array frame.
    current_index: usize,
}

struct Extractor<'p, 't, I, T: Tree> {
    tokens: Classifier<I>,
    stack: Vec<Frame<'p, 't, T>>,
    options: CodecOptions,
    /// Final index of the root frame, recorded when it is popped.
    root_index: usize,
}

impl<'p, 't, I, T> Extractor<'p, 't, I, T>
where
    't: 'p,
    I: Iterator<Item = Get<'p, 't, T>>,
    T: TreeView + 't,
{
    fn new(tokens: I, options: &CodecOptions) -> Self {
        Self {
            tokens: Classifier::new(tokens),
            stack: Vec::with_capacity(options.max_depth.min(DEFAULT_MAX_DEPTH)),
            options: *options,
            root_index: 0,
        }
    }

    fn push(&mut self, level: Level<'t, T>, start: usize) -> Result<(), ProtocolError> {
        if self.stack.len() >= self.options.max_depth {
            return Err(ProtocolError::DepthExceeded {
                max_depth: self.options.max_depth,
            });
        }
        trace!(depth = self.stack.len() + 1, "entered container");
        self.stack.push(Frame {
            level,
            current_key: None,
            current_index: start,
        });
        Ok(())
    }

    fn pop(&mut self) {
        if let Some(frame) = self.stack.pop() {
            trace!(depth = self.stack.len() + 1, "left container");
            if self.stack.is_empty() {
                self.root_index = frame.current_index;
            }
        }
    }

    /// Index reached in the root array, whether or not matching finished.
    fn root_position(&self) -> usize {
        self.stack
            .first()
            .map_or(self.root_index, |frame| frame.current_index)
    }

    fn mismatch(&self, reason: Mismatch) -> ExtractError {
        debug!(
            depth = self.stack.len(),
            key = self.stack.last().and_then(|frame| frame.current_key),
            %reason,
            "pattern did not match"
        );
        ExtractError::Mismatch(reason)
    }

    fn run(&mut self) -> Result<(), ExtractError> {
        while let Some(level) = self.stack.last().map(|frame| frame.level) {
            match level {
                Level::Object(members) => self.step_object(members)?,
                Level::Array(elements) => self.step_array(elements)?,
            }
        }
        Ok(())
    }

    fn step_object(&mut self, members: &'t T::Object) -> Result<(), ExtractError> {
        let key = match self.tokens.next_class() {
            Class::End | Class::ObjectEnd => {
                self.pop();
                return Ok(());
            }
            Class::Raw(key) => key,
            other => {
                return Err(ProtocolError::InvalidKey {
                    position: self.tokens.position(),
                    found: other.kind(),
                }
                .into());
            }
        };
        if let Some(frame) = self.stack.last_mut() {
            frame.current_key = Some(key);
        }
        let Some(node) = T::object_get(members, key) else {
            return Err(self.mismatch(Mismatch::MissingKey { key: key.to_owned() }));
        };
        let value = self.tokens.next_class();
        self.match_value(value, node, Some(key))
    }

    fn step_array(&mut self, elements: &'t T::Array) -> Result<(), ExtractError> {
        let value = self.tokens.next_class();
        match value {
            // A pattern may stop short of the array's end.
            Class::End | Class::ArrayEnd => {
                self.pop();
                return Ok(());
            }
            Class::ObjectEnd => {
                return Err(ProtocolError::UnbalancedClose {
                    position: self.tokens.position(),
                    found: value.kind(),
                }
                .into());
            }
            _ => {}
        }
        let index = self.stack.last().map_or(0, |frame| frame.current_index);
        let Some(node) = T::array_get(elements, index) else {
            return Err(self.mismatch(Mismatch::IndexOutOfRange { index }));
        };
        if let Some(frame) = self.stack.last_mut() {
            frame.current_index = index + 1;
        }
        self.match_value(value, node, None)
    }

    fn match_value(
        &mut self,
        class: Class<'p, Slot<'p, 't, T>>,
        node: &'t T,
        key: Option<&'p str>,
    ) -> Result<(), ExtractError> {
        match class {
            Class::Typed(slot) => self.fill(slot, node),
            Class::ObjectStart => match T::as_object(node) {
                Some(members) => Ok(self.push(Level::Object(members), 0)?),
                None => Err(self.wrong_kind(NodeKind::Object, node)),
            },
            Class::ArrayStart => match T::as_array(node) {
                Some(elements) => Ok(self.push(Level::Array(elements), 0)?),
                None => Err(self.wrong_kind(NodeKind::Array, node)),
            },
            Class::Raw(literal) => match T::as_str(node) {
                Some(s) if s == literal => Ok(()),
                Some(_) => Err(self.mismatch(Mismatch::LiteralMismatch {
                    expected: literal.to_owned(),
                })),
                None => Err(self.wrong_kind(NodeKind::String, node)),
            },
            Class::ObjectEnd | Class::ArrayEnd | Class::End => Err(ProtocolError::MissingValue {
                position: self.tokens.position(),
                key: key.unwrap_or_default().to_owned(),
            }
            .into()),
        }
    }

    fn wrong_kind(&self, expected: NodeKind, node: &T) -> ExtractError {
        self.mismatch(Mismatch::WrongKind {
            expected,
            found: T::kind(node),
        })
    }

    /// Stores `value` in `out`, or applies the scalar mismatch policy when the
    /// node had another variant.
    fn write<V: Default>(
        &self,
        out: &mut V,
        value: Option<V>,
        expected: NodeKind,
        node: &T,
    ) -> Result<(), ExtractError> {
        if let Some(value) = value {
            *out = value;
            return Ok(());
        }
        match self.options.scalar_mismatch {
            ScalarMismatch::Fail => Err(self.wrong_kind(expected, node)),
            ScalarMismatch::WriteDefault => {
                *out = V::default();
                Ok(())
            }
        }
    }

    fn fill(&self, slot: Slot<'p, 't, T>, node: &'t T) -> Result<(), ExtractError> {
        match slot {
            Slot::String(out) => self.write(out, T::as_str(node), NodeKind::String, node),
            Slot::Double(out) => self.write(out, T::as_f64(node), NodeKind::Double, node),
            Slot::Integer(out) => self.write(out, T::as_i64(node), NodeKind::Integer, node),
            Slot::Boolean(out) => self.write(out, T::as_bool(node), NodeKind::Boolean, node),
            Slot::Null => Ok(()),
            Slot::Node(out) => {
                *out = Some(node);
                Ok(())
            }
            Slot::Object(out) => {
                self.write(out, T::as_object(node).map(Some), NodeKind::Object, node)
            }
            Slot::Array(out) => self.write(
                out,
                T::as_array(node).map(|elements| Some(ArrayCursor::new(elements))),
                NodeKind::Array,
                node,
            ),
            Slot::Strv(out) => {
                let Some(elements) = T::as_array(node) else {
                    return self.write(out, None, NodeKind::Array, node);
                };
                let mut strings = Vec::with_capacity(T::array_len(elements));
                for element in ArrayCursor::<T>::new(elements) {
                    match T::as_str(element) {
                        Some(s) => strings.push(s),
                        None => return self.write(out, None, NodeKind::String, element),
                    }
                }
                *out = strings;
                Ok(())
            }
        }
    }
}

/// Matches `patterns` against the members (or elements) of `node`.
pub(crate) fn extract<'p, 't, T, I>(
    node: &'t T,
    patterns: I,
    options: &CodecOptions,
) -> Result<(), ExtractError>
where
    't: 'p,
    T: TreeView + 't,
    I: Iterator<Item = Get<'p, 't, T>>,
{
    let mut extractor = Extractor::new(patterns, options);
    let level = if let Some(members) = T::as_object(node) {
        Level::Object(members)
    } else if let Some(elements) = T::as_array(node) {
        Level::Array(elements)
    } else {
        return Err(extractor.mismatch(Mismatch::NotContainer {
            found: T::kind(node),
        }));
    };
    extractor.push(level, 0)?;
    extractor.run()
}

/// Matches `patterns` against the unconsumed elements of `cursor`, advancing
/// it past every element the pattern consumed.
pub(crate) fn extract_array<'p, 't, T, I>(
    cursor: &mut ArrayCursor<'t, T>,
    patterns: I,
    options: &CodecOptions,
) -> Result<(), ExtractError>
where
    't: 'p,
    T: TreeView + 't,
    I: Iterator<Item = Get<'p, 't, T>>,
{
    let mut extractor = Extractor::new(patterns, options);
    extractor.push(Level::Array(cursor.elements), cursor.position)?;
    let result = extractor.run();
    cursor.position = extractor.root_position();
    result
}
