//! The token classifier shared by the builder and the extractor.
//!
//! Each call to [`Classifier::next_class`] consumes exactly one token and
//! reports what it means in the grammar. Once the stream is exhausted, or an
//! explicit `End` token has been read, every further call reports
//! [`Class::End`] without touching the underlying iterator.

use crate::{
    backend::Tree,
    extract::ArrayCursor,
    token::{Discriminant, Get, Put, TokenKind},
};

pub(crate) enum Class<'a, V> {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    End,
    Raw(&'a str),
    Typed(V),
}

impl<V: Typed> Class<'_, V> {
    pub(crate) fn kind(&self) -> TokenKind {
        match self {
            Class::ObjectStart => TokenKind::ObjectStart,
            Class::ObjectEnd => TokenKind::ObjectEnd,
            Class::ArrayStart => TokenKind::ArrayStart,
            Class::ArrayEnd => TokenKind::ArrayEnd,
            Class::End => TokenKind::End,
            Class::Raw(_) => TokenKind::Raw,
            Class::Typed(v) => TokenKind::Typed(v.discriminant()),
        }
    }
}

/// Reads the structural meaning of a raw string from its first character.
#[inline]
fn classify_raw<V>(text: &str) -> Class<'_, V> {
    match text.as_bytes().first() {
        Some(b'{') => Class::ObjectStart,
        Some(b'}') => Class::ObjectEnd,
        Some(b'[') => Class::ArrayStart,
        Some(b']') => Class::ArrayEnd,
        _ => Class::Raw(text),
    }
}

pub(crate) trait Typed {
    fn discriminant(&self) -> Discriminant;
}

pub(crate) trait Classify<'a> {
    type Typed: Typed;

    fn classify(self) -> Class<'a, Self::Typed>;
}

/// Payload of a typed build token.
pub(crate) enum Scalar<'a, T: Tree> {
    String(&'a str),
    Double(f64),
    Integer(i64),
    Boolean(bool),
    Null,
    Node(T),
    Object(T::Object),
    Array(T::Array),
    Strv(&'a [&'a str]),
}

impl<T: Tree> Typed for Scalar<'_, T> {
    fn discriminant(&self) -> Discriminant {
        match self {
            Scalar::String(_) => Discriminant::String,
            Scalar::Double(_) => Discriminant::Double,
            Scalar::Integer(_) => Discriminant::Integer,
            Scalar::Boolean(_) => Discriminant::Boolean,
            Scalar::Null => Discriminant::Null,
            Scalar::Node(_) => Discriminant::Node,
            Scalar::Object(_) => Discriminant::Object,
            Scalar::Array(_) => Discriminant::Array,
            Scalar::Strv(_) => Discriminant::Strv,
        }
    }
}

impl<'a, T: Tree> Classify<'a> for Put<'a, T> {
    type Typed = Scalar<'a, T>;

    fn classify(self) -> Class<'a, Self::Typed> {
        Class::Typed(match self {
            Put::Raw(text) => return classify_raw(text),
            Put::End => return Class::End,
            Put::String(s) => Scalar::String(s),
            Put::Double(n) => Scalar::Double(n),
            Put::Integer(n) => Scalar::Integer(n),
            Put::Boolean(b) => Scalar::Boolean(b),
            Put::Null => Scalar::Null,
            Put::Node(node) => Scalar::Node(node),
            Put::Object(members) => Scalar::Object(members),
            Put::Array(elements) => Scalar::Array(elements),
            Put::Strv(strings) => Scalar::Strv(strings),
        })
    }
}

/// Output slot of a typed pattern token.
pub(crate) enum Slot<'p, 't, T: Tree> {
    String(&'p mut &'t str),
    Double(&'p mut f64),
    Integer(&'p mut i64),
    Boolean(&'p mut bool),
    Null,
    Node(&'p mut Option<&'t T>),
    Object(&'p mut Option<&'t T::Object>),
    Array(&'p mut Option<ArrayCursor<'t, T>>),
    Strv(&'p mut Vec<&'t str>),
}

impl<T: Tree> Typed for Slot<'_, '_, T> {
    fn discriminant(&self) -> Discriminant {
        match self {
            Slot::String(_) => Discriminant::String,
            Slot::Double(_) => Discriminant::Double,
            Slot::Integer(_) => Discriminant::Integer,
            Slot::Boolean(_) => Discriminant::Boolean,
            Slot::Null => Discriminant::Null,
            Slot::Node(_) => Discriminant::Node,
            Slot::Object(_) => Discriminant::Object,
            Slot::Array(_) => Discriminant::Array,
            Slot::Strv(_) => Discriminant::Strv,
        }
    }
}

impl<'p, 't, T: Tree> Classify<'p> for Get<'p, 't, T> {
    type Typed = Slot<'p, 't, T>;

    fn classify(self) -> Class<'p, Self::Typed> {
        Class::Typed(match self {
            Get::Raw(text) => return classify_raw(text),
            Get::End => return Class::End,
            Get::String(out) => Slot::String(out),
            Get::Double(out) => Slot::Double(out),
            Get::Integer(out) => Slot::Integer(out),
            Get::Boolean(out) => Slot::Boolean(out),
            Get::Null => Slot::Null,
            Get::Node(out) => Slot::Node(out),
            Get::Object(out) => Slot::Object(out),
            Get::Array(out) => Slot::Array(out),
            Get::Strv(out) => Slot::Strv(out),
        })
    }
}

pub(crate) struct Classifier<I> {
    tokens: I,
    consumed: usize,
    done: bool,
}

impl<I> Classifier<I> {
    pub(crate) fn new(tokens: I) -> Self {
        Self {
            tokens,
            consumed: 0,
            done: false,
        }
    }

    /// Index of the most recently classified token. After the stream ends this
    /// is the number of tokens read.
    pub(crate) fn position(&self) -> usize {
        if self.done {
            self.consumed
        } else {
            self.consumed.saturating_sub(1)
        }
    }
}

impl<'a, I> Classifier<I>
where
    I: Iterator,
    I::Item: Classify<'a>,
{
    pub(crate) fn next_class(&mut self) -> Class<'a, <I::Item as Classify<'a>>::Typed> {
        if self.done {
            return Class::End;
        }
        let Some(token) = self.tokens.next() else {
            self.done = true;
            return Class::End;
        };
        self.consumed += 1;
        let class = token.classify();
        if matches!(class, Class::End) {
            self.done = true;
        }
        class
    }
}
