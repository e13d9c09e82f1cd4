#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use tokentree::{Codec, CodecOptions, ExtractError, Get, Node, Put, ScalarMismatch, Tree, TreeView};

#[derive(Arbitrary, Debug)]
enum Token {
    Raw(String),
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Null,
    Strv(Vec<String>),
    End,
}

#[derive(Arbitrary, Debug)]
struct Input {
    tokens: Vec<Token>,
    pattern: Vec<Token>,
    max_depth: u8,
    write_default: bool,
}

/// The serde_json backend stores non-finite doubles as null.
fn finite(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

fn put_tokens<'a, T: Tree>(tokens: &'a [Token], strv: &'a [Vec<&'a str>]) -> Vec<Put<'a, T>> {
    let mut strv = strv.iter();
    tokens
        .iter()
        .map(|token| match token {
            Token::Raw(s) => Put::Raw(s),
            Token::ObjectStart => Put::Raw("{"),
            Token::ObjectEnd => Put::Raw("}"),
            Token::ArrayStart => Put::Raw("["),
            Token::ArrayEnd => Put::Raw("]"),
            Token::String(s) => Put::String(s),
            Token::Integer(n) => Put::Integer(*n),
            Token::Double(n) => Put::Double(finite(*n)),
            Token::Boolean(b) => Put::Boolean(*b),
            Token::Null => Put::Null,
            Token::Strv(_) => Put::Strv(strv.next().map_or(&[][..], Vec::as_slice)),
            Token::End => Put::End,
        })
        .collect()
}

/// Values read by a pattern, copied out of the tree they were read from.
#[derive(Debug, Default, PartialEq)]
struct Outputs {
    strings: Vec<String>,
    integers: Vec<i64>,
    doubles: Vec<u64>,
    booleans: Vec<bool>,
    strvs: Vec<Vec<String>>,
}

fn run_pattern<T: TreeView>(
    codec: &Codec,
    tree: &T,
    pattern: &[Token],
) -> (Result<(), ExtractError>, Outputs) {
    let count = |f: fn(&Token) -> bool| pattern.iter().filter(|t| f(t)).count();
    let mut strings = vec![""; count(|t| matches!(t, Token::String(_)))];
    let mut integers = vec![0i64; count(|t| matches!(t, Token::Integer(_)))];
    let mut doubles = vec![0.0f64; count(|t| matches!(t, Token::Double(_)))];
    let mut booleans = vec![false; count(|t| matches!(t, Token::Boolean(_)))];
    let mut strvs: Vec<Vec<&str>> = vec![Vec::new(); count(|t| matches!(t, Token::Strv(_)))];

    let result = {
        let mut strings = strings.iter_mut();
        let mut integers = integers.iter_mut();
        let mut doubles = doubles.iter_mut();
        let mut booleans = booleans.iter_mut();
        let mut strvs = strvs.iter_mut();
        let patterns = pattern.iter().filter_map(|token| {
            Some(match token {
                Token::Raw(s) => Get::Raw(s),
                Token::ObjectStart => Get::Raw("{"),
                Token::ObjectEnd => Get::Raw("}"),
                Token::ArrayStart => Get::Raw("["),
                Token::ArrayEnd => Get::Raw("]"),
                Token::String(_) => Get::String(strings.next()?),
                Token::Integer(_) => Get::Integer(integers.next()?),
                Token::Double(_) => Get::Double(doubles.next()?),
                Token::Boolean(_) => Get::Boolean(booleans.next()?),
                Token::Null => Get::Null,
                Token::Strv(_) => Get::Strv(strvs.next()?),
                Token::End => Get::End,
            })
        });
        codec.try_extract(tree, patterns)
    };

    let outputs = Outputs {
        strings: strings.into_iter().map(str::to_owned).collect(),
        integers,
        doubles: doubles.into_iter().map(f64::to_bits).collect(),
        booleans,
        strvs: strvs
            .into_iter()
            .map(|v| v.into_iter().map(str::to_owned).collect())
            .collect(),
    };
    (result, outputs)
}

fuzz_target!(|input: Input| {
    let codec = Codec::new(CodecOptions {
        max_depth: usize::from(input.max_depth % 40),
        scalar_mismatch: if input.write_default {
            ScalarMismatch::WriteDefault
        } else {
            ScalarMismatch::Fail
        },
    });

    let strv: Vec<Vec<&str>> = input
        .tokens
        .iter()
        .filter_map(|t| match t {
            Token::Strv(v) => Some(v.iter().map(String::as_str).collect()),
            _ => None,
        })
        .collect();

    let node = codec.try_build::<Node, _>(put_tokens(&input.tokens, &strv));
    let value = codec.try_build::<Value, _>(put_tokens(&input.tokens, &strv));

    let (node, value) = match (node, value) {
        (Ok(node), Ok(value)) => (node, value),
        (Err(a), Err(b)) => {
            assert_eq!(a, b);
            return;
        }
        (node, value) => panic!("backends disagree: {node:?} vs {value:?}"),
    };
    assert_eq!(serde_json::to_value(&node).expect("node serializes"), value);

    let (node_result, node_outputs) = run_pattern(&codec, &node, &input.pattern);
    let (value_result, value_outputs) = run_pattern(&codec, &value, &input.pattern);
    assert_eq!(node_result, value_result);
    assert_eq!(node_outputs, value_outputs);
});
