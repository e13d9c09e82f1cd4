//! Builds a tree from a [`Put`] token stream.
//!
//! The builder never recurses. The container under construction is held in
//! `current`; opening a child moves it onto `parents` and closing the child
//! moves it back and attaches the finished child. `parents` is allocated once
//! at the configured depth limit.

use core::mem;

use tracing::trace;

use crate::{
    backend::TreeFactory,
    classify::{Class, Classifier, Scalar},
    error::ProtocolError,
    options::{CodecOptions, DEFAULT_MAX_DEPTH},
    token::Put,
};

enum Container<T: TreeFactory> {
    Object(T::Object),
    Array(T::Array),
}

struct Frame<T: TreeFactory> {
    container: Container<T>,
    /// Key the finished container is stored under in its parent. `None` for
    /// array elements and for the top-level object.
    key: Option<String>,
}

impl<T: TreeFactory> Frame<T> {
    fn object(key: Option<String>) -> Self {
        Self {
            container: Container::Object(T::new_object()),
            key,
        }
    }

    fn array(key: Option<String>) -> Self {
        Self {
            container: Container::Array(T::new_array()),
            key,
        }
    }

    fn is_object(&self) -> bool {
        matches!(self.container, Container::Object(_))
    }

    fn attach(&mut self, key: Option<String>, value: T) {
        match &mut self.container {
            Container::Object(members) => {
                debug_assert!(key.is_some(), "object members are always keyed");
                T::insert_object(members, key.unwrap_or_default(), value);
            }
            Container::Array(elements) => T::push_array(elements, value),
        }
    }

    fn finish(self) -> (Option<String>, T) {
        let node = match self.container {
            Container::Object(members) => T::from_object(members),
            Container::Array(elements) => T::from_array(elements),
        };
        (self.key, node)
    }
}

fn scalar_into_tree<T: TreeFactory>(scalar: Scalar<'_, T>) -> T {
    match scalar {
        Scalar::String(s) => T::new_string(s),
        Scalar::Double(n) => T::new_double(n),
        Scalar::Integer(n) => T::new_integer(n),
        Scalar::Boolean(b) => T::new_bool(b),
        Scalar::Null => T::new_null(),
        Scalar::Node(node) => node,
        Scalar::Object(members) => T::from_object(members),
        Scalar::Array(elements) => T::from_array(elements),
        Scalar::Strv(strings) => {
            let mut elements = T::new_array();
            for s in strings {
                T::push_array(&mut elements, T::new_string(s));
            }
            T::from_array(elements)
        }
    }
}

struct Builder<I, T: TreeFactory> {
    tokens: Classifier<I>,
    parents: Vec<Frame<T>>,
    max_depth: usize,
}

impl<'a, I, T> Builder<I, T>
where
    I: Iterator<Item = Put<'a, T>>,
    T: TreeFactory,
{
    fn run(mut self) -> Result<T, ProtocolError> {
        if self.max_depth == 0 {
            return Err(ProtocolError::DepthExceeded { max_depth: 0 });
        }

        let mut current = Frame::object(None);
        loop {
            let class = self.tokens.next_class();
            if matches!(class, Class::ObjectEnd | Class::ArrayEnd | Class::End) {
                let (key, node) = current.finish();
                trace!(depth = self.parents.len() + 1, "closed container");
                match self.parents.pop() {
                    Some(mut parent) => {
                        parent.attach(key, node);
                        current = parent;
                        continue;
                    }
                    None => return Ok(node),
                }
            }

            if current.is_object() {
                let key = match class {
                    Class::Raw(key) => key.to_owned(),
                    other => {
                        return Err(ProtocolError::InvalidKey {
                            position: self.tokens.position(),
                            found: other.kind(),
                        });
                    }
                };
                let value = self.tokens.next_class();
                self.place(&mut current, value, Some(key))?;
            } else {
                self.place(&mut current, class, None)?;
            }
        }
    }

    /// Stores one value token into `current`, or opens the child container it
    /// starts.
    fn place(
        &mut self,
        current: &mut Frame<T>,
        class: Class<'a, Scalar<'a, T>>,
        key: Option<String>,
    ) -> Result<(), ProtocolError> {
        match class {
            Class::Typed(scalar) => current.attach(key, scalar_into_tree(scalar)),
            Class::Raw(text) => current.attach(key, T::new_string(text)),
            Class::ObjectStart => self.open(current, Frame::object(key))?,
            Class::ArrayStart => self.open(current, Frame::array(key))?,
            Class::ObjectEnd | Class::ArrayEnd | Class::End => {
                return Err(ProtocolError::MissingValue {
                    position: self.tokens.position(),
                    key: key.unwrap_or_default(),
                });
            }
        }
        Ok(())
    }

    fn open(&mut self, current: &mut Frame<T>, child: Frame<T>) -> Result<(), ProtocolError> {
        // `current` plus its parents are open; the child adds one more.
        let depth = self.parents.len() + 2;
        if depth > self.max_depth {
            return Err(ProtocolError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        trace!(depth, object = child.is_object(), "opened container");
        self.parents.push(mem::replace(current, child));
        Ok(())
    }
}

/// Builds a tree whose top level is always an object.
pub(crate) fn build<'a, T, I>(tokens: I, options: &CodecOptions) -> Result<T, ProtocolError>
where
    T: TreeFactory,
    I: Iterator<Item = Put<'a, T>>,
{
    Builder {
        tokens: Classifier::new(tokens),
        parents: Vec::with_capacity(options.max_depth.min(DEFAULT_MAX_DEPTH).saturating_sub(1)),
        max_depth: options.max_depth,
    }
    .run()
}
