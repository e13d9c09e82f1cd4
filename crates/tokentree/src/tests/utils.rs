//! Converts trees back into the token streams that describe them.

use core::slice::IterMut;

use crate::{Get, Node, Put, Tree};

/// Returns `true` if `s` would be read as a structural marker in raw form.
pub(crate) fn is_reserved(s: &str) -> bool {
    matches!(s.as_bytes().first(), Some(b'{' | b'}' | b'[' | b']'))
}

/// The build stream for an object node: its members, without the outer
/// braces. Strings go through the typed escape unless `raw_strings` is set
/// and the raw form is unambiguous.
pub(crate) fn put_tokens<T: Tree>(node: &Node, raw_strings: bool) -> Vec<Put<'_, T>> {
    fn walk<'a, T: Tree>(node: &'a Node, raw_strings: bool, out: &mut Vec<Put<'a, T>>) {
        let token = match node {
            Node::Null => Put::Null,
            Node::Boolean(b) => Put::Boolean(*b),
            Node::Integer(n) => Put::Integer(*n),
            Node::Double(n) => Put::Double(*n),
            Node::String(s) if raw_strings && !is_reserved(s) => Put::Raw(s),
            Node::String(s) => Put::String(s),
            Node::Array(elements) => {
                out.push(Put::Raw("["));
                for element in elements {
                    walk(element, raw_strings, out);
                }
                Put::Raw("]")
            }
            Node::Object(members) => {
                out.push(Put::Raw("{"));
                members_into(members, raw_strings, out);
                Put::Raw("}")
            }
        };
        out.push(token);
    }

    fn members_into<'a, T: Tree>(
        members: &'a crate::Map,
        raw_strings: bool,
        out: &mut Vec<Put<'a, T>>,
    ) {
        for (key, value) in members {
            out.push(Put::Raw(key));
            walk(value, raw_strings, out);
        }
    }

    let mut out = Vec::new();
    members_into(node.as_object().expect("object root"), raw_strings, &mut out);
    out
}

/// Scalar values of a tree in pre-order.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Scalars<'t> {
    pub(crate) strings: Vec<&'t str>,
    pub(crate) integers: Vec<i64>,
    pub(crate) doubles: Vec<f64>,
    pub(crate) booleans: Vec<bool>,
}

impl<'t> Scalars<'t> {
    pub(crate) fn collect(node: &'t Node) -> Self {
        fn walk<'t>(node: &'t Node, out: &mut Scalars<'t>) {
            match node {
                Node::Null => {}
                Node::Boolean(b) => out.booleans.push(*b),
                Node::Integer(n) => out.integers.push(*n),
                Node::Double(n) => out.doubles.push(*n),
                Node::String(s) => out.strings.push(s),
                Node::Array(elements) => elements.iter().for_each(|e| walk(e, out)),
                Node::Object(members) => members.values().for_each(|v| walk(v, out)),
            }
        }
        let mut out = Scalars::default();
        walk(node, &mut out);
        out
    }

    /// Same shape, every value reset to its default.
    pub(crate) fn cleared(&self) -> Self {
        Self {
            strings: vec![""; self.strings.len()],
            integers: vec![0; self.integers.len()],
            doubles: vec![0.0; self.doubles.len()],
            booleans: vec![false; self.booleans.len()],
        }
    }

    pub(crate) fn double_bits(&self) -> Vec<u64> {
        self.doubles.iter().map(|d| d.to_bits()).collect()
    }
}

/// Builds the pattern that mirrors an object node: literal keys, nested
/// markers, and a typed slot in `outputs` for every scalar value.
///
/// `outputs` must have the shape of [`Scalars::collect`] for `node`.
pub(crate) fn mirror_pattern<'p, 't, T: Tree>(
    node: &'p Node,
    outputs: &'p mut Scalars<'t>,
) -> Vec<Get<'p, 't, T>> {
    struct Mirror<'p, 't, T: Tree> {
        strings: IterMut<'p, &'t str>,
        integers: IterMut<'p, i64>,
        doubles: IterMut<'p, f64>,
        booleans: IterMut<'p, bool>,
        tokens: Vec<Get<'p, 't, T>>,
    }

    impl<'p, 't, T: Tree> Mirror<'p, 't, T> {
        fn value(&mut self, node: &'p Node) {
            let token = match node {
                Node::Null => Get::Null,
                Node::Boolean(_) => Get::Boolean(self.booleans.next().expect("sized outputs")),
                Node::Integer(_) => Get::Integer(self.integers.next().expect("sized outputs")),
                Node::Double(_) => Get::Double(self.doubles.next().expect("sized outputs")),
                Node::String(_) => Get::String(self.strings.next().expect("sized outputs")),
                Node::Array(elements) => {
                    self.tokens.push(Get::Raw("["));
                    for element in elements {
                        self.value(element);
                    }
                    Get::Raw("]")
                }
                Node::Object(members) => {
                    self.tokens.push(Get::Raw("{"));
                    self.members(members);
                    Get::Raw("}")
                }
            };
            self.tokens.push(token);
        }

        fn members(&mut self, members: &'p crate::Map) {
            for (key, value) in members {
                self.tokens.push(Get::Raw(key));
                self.value(value);
            }
        }
    }

    let mut mirror = Mirror {
        strings: outputs.strings.iter_mut(),
        integers: outputs.integers.iter_mut(),
        doubles: outputs.doubles.iter_mut(),
        booleans: outputs.booleans.iter_mut(),
        tokens: Vec::new(),
    };
    mirror.members(node.as_object().expect("object root"));
    mirror.tokens
}
