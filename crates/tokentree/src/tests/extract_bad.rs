use rstest::rstest;

use crate::{
    ArrayCursor, Codec, CodecOptions, ExtractError, Get, Mismatch, Node, NodeKind, ProtocolError,
    TokenKind, extract, extract_array, tree, try_extract, try_extract_array,
};

fn hover() -> Node {
    tree!(
        "contents", "{", "kind", "markdown", "value", "fn main()", "}",
        "range", "{",
            "start", "{", "line", 0, "character", 3, "}",
            "end", "{", "line", 0, "character", 7, "}",
        "}",
    )
}

#[rstest]
#[case::missing_key(&["contents", "{", "language"], Mismatch::MissingKey { key: "language".into() })]
#[case::literal(&["contents", "{", "kind", "plaintext"], Mismatch::LiteralMismatch { expected: "plaintext".into() })]
#[case::object_for_array(&["contents", "["], Mismatch::WrongKind { expected: NodeKind::Array, found: NodeKind::Object })]
#[case::literal_for_object(&["range", "whole"], Mismatch::WrongKind { expected: NodeKind::String, found: NodeKind::Object })]
#[case::string_for_object(&["contents", "{", "kind", "{"], Mismatch::WrongKind { expected: NodeKind::Object, found: NodeKind::String })]
fn shape_mismatches_are_reported(#[case] pattern: &[&str], #[case] expected: Mismatch) {
    let node = hover();
    let patterns = pattern.iter().map(|s| Get::Raw(s));
    assert_eq!(try_extract(&node, patterns), Err(ExtractError::Mismatch(expected)));
    assert!(!extract(&node, pattern.iter().map(|s| Get::Raw(s))));
}

#[test]
fn slots_before_a_mismatch_stay_written() {
    let node = hover();
    let mut kind = "";
    let mut line = -1i64;
    assert!(!extract!(
        &node,
        "contents", "{", "kind", &mut kind, "}",
        "range", "{", "start", "{", "line", &mut line, "column", Get::Null, "}", "}",
    ));
    assert_eq!(kind, "markdown");
    assert_eq!(line, 0);
}

#[test]
fn double_slot_rejects_integers() {
    let node = hover();
    let mut line = 0.0f64;
    assert_eq!(
        try_extract(
            &node,
            ["range", "{", "start", "{", "line"]
                .map(Get::from)
                .into_iter()
                .chain([Get::from(&mut line)])
        ),
        Err(ExtractError::Mismatch(Mismatch::WrongKind {
            expected: NodeKind::Double,
            found: NodeKind::Integer,
        }))
    );
    assert_eq!(line.to_bits(), 0.0f64.to_bits());
}

#[test]
fn cursor_runs_out_of_elements() {
    let node = tree!("xs", "[", 1, "]");
    let mut xs: Option<ArrayCursor<'_, Node>> = None;
    assert!(extract!(&node, "xs", &mut xs));
    let mut cursor = xs.expect("cursor");
    let (mut first, mut second) = (0i64, 0i64);
    assert_eq!(
        try_extract_array(&mut cursor, [Get::from(&mut first), Get::from(&mut second)]),
        Err(ExtractError::Mismatch(Mismatch::IndexOutOfRange { index: 1 }))
    );
    assert_eq!(first, 1);
    assert_eq!(cursor.position(), 1);
    assert!(!extract_array(&mut cursor, [Get::from(&mut second)]));
}

#[test]
fn scalar_roots_cannot_be_matched() {
    assert_eq!(
        try_extract(&Node::Boolean(true), []),
        Err(ExtractError::Mismatch(Mismatch::NotContainer {
            found: NodeKind::Boolean
        }))
    );
}

#[test]
#[should_panic(expected = "malformed token stream: token 0: expected an object key, found a typed integer")]
fn typed_key_panics() {
    let node = hover();
    let mut n = 0i64;
    let _ = extract!(&node, &mut n);
}

#[test]
#[should_panic(expected = "key \"contents\" has no value")]
fn dangling_key_panics() {
    let node = hover();
    let _ = extract!(&node, "contents");
}

#[test]
#[should_panic(expected = "unbalanced \"}\"")]
fn object_close_in_array_panics() {
    let node = tree!("xs", "[", 1, "]");
    let _ = extract!(&node, "xs", "[", "}");
}

#[test]
fn array_close_in_key_position_is_malformed() {
    let node = hover();
    assert_eq!(
        try_extract(&node, [Get::from("contents"), Get::from("{"), Get::from("]")]),
        Err(ExtractError::Protocol(ProtocolError::InvalidKey {
            position: 2,
            found: TokenKind::ArrayEnd,
        }))
    );
}

#[test]
fn pattern_depth_is_bounded() {
    let codec = Codec::new(CodecOptions {
        max_depth: 2,
        ..CodecOptions::default()
    });
    let node = hover();
    assert!(codec.extract(&node, ["range", "{"].map(Get::from)));
    assert_eq!(
        codec.try_extract(&node, ["range", "{", "start", "{"].map(Get::from)),
        Err(ExtractError::Protocol(ProtocolError::DepthExceeded { max_depth: 2 }))
    );
}

#[test]
fn zero_depth_rejects_every_extraction() {
    let codec = Codec::new(CodecOptions {
        max_depth: 0,
        ..CodecOptions::default()
    });
    let result = codec.try_extract(&hover(), []);
    assert!(matches!(result, Err(ExtractError::Protocol(ProtocolError::DepthExceeded { .. }))));
    assert!(!result.unwrap_err().is_mismatch());
}
