use quickcheck::{Arbitrary, Gen};

use super::utils::is_reserved;
use crate::{Map, Node};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct FiniteDouble(f64);

impl Arbitrary for FiniteDouble {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

/// A string usable as an object key in raw form.
fn key(g: &mut Gen) -> String {
    let mut key = String::arbitrary(g);
    while is_reserved(&key) {
        key.remove(0);
    }
    key
}

impl Arbitrary for Node {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Node {
            let choices = if depth == 0 { 5 } else { 7 };
            match usize::arbitrary(g) % choices {
                0 => Node::Null,
                1 => Node::Boolean(bool::arbitrary(g)),
                2 => Node::Integer(i64::arbitrary(g)),
                3 => Node::Double(FiniteDouble::arbitrary(g).0),
                4 => Node::String(String::arbitrary(g)),
                5 => {
                    let len = usize::arbitrary(g) % 4;
                    Node::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => gen_object(g, depth - 1),
            }
        }

        fn gen_object(g: &mut Gen, depth: usize) -> Node {
            let len = usize::arbitrary(g) % 4;
            let mut map = Map::new();
            for _ in 0..len {
                map.insert(key(g), gen_val(g, depth));
            }
            Node::Object(map)
        }

        // Message roots are always objects.
        let depth = usize::arbitrary(g) % 4;
        gen_object(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Node::Object(members) if !members.is_empty() => {
                let members = members.clone();
                Box::new((0..members.len()).map(move |i| {
                    let mut smaller = members.clone();
                    smaller.shift_remove_index(i);
                    Node::Object(smaller)
                }))
            }
            _ => quickcheck::empty_shrinker(),
        }
    }
}

#[test]
fn generated_roots_are_objects_with_raw_safe_keys() {
    let mut g = Gen::new(16);
    for _ in 0..100 {
        let node = Node::arbitrary(&mut g);
        let members = node.as_object().expect("object root");
        assert!(members.keys().all(|k| !is_reserved(k)));
    }
}
