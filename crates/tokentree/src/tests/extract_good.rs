use crate::{
    ArrayCursor, Codec, CodecOptions, Get, Map, Node, Put, ScalarMismatch, extract, extract_array,
    tree,
};

fn publish_diagnostics() -> Node {
    tree!(
        "uri", "file:///src/lib.rs",
        "diagnostics", "[",
            "{",
                "range", "{",
                    "start", "{", "line", 3, "character", 8, "}",
                    "end", "{", "line", 3, "character", 12, "}",
                "}",
                "severity", 2,
                "message", "unused variable: `x`",
            "}",
            "{",
                "range", "{",
                    "start", "{", "line", 10, "character", 0, "}",
                    "end", "{", "line", 11, "character", 1, "}",
                "}",
                "severity", 1,
                "message", "mismatched types",
            "}",
        "]",
    )
}

#[test]
fn diagnostics_are_read_one_element_at_a_time() {
    let params = publish_diagnostics();
    let mut uri = "";
    let mut diagnostics: Option<ArrayCursor<'_, Node>> = None;
    assert!(extract!(&params, "uri", &mut uri, "diagnostics", &mut diagnostics));
    assert_eq!(uri, "file:///src/lib.rs");

    let mut seen = Vec::new();
    for diagnostic in diagnostics.expect("diagnostics cursor") {
        let (mut line, mut severity) = (0i64, 0i64);
        let mut message = "";
        assert!(extract!(
            diagnostic,
            "range", "{", "start", "{", "line", &mut line, "}", "}",
            "severity", &mut severity,
            "message", &mut message,
        ));
        seen.push((line, severity, message));
    }
    assert_eq!(
        seen,
        [(3, 2, "unused variable: `x`"), (10, 1, "mismatched types")]
    );
}

#[test]
fn extract_array_matches_elements_positionally() {
    let node = tree!("args", "[", "textDocument/didOpen", 3, 0.5, true, "]");
    let mut args: Option<ArrayCursor<'_, Node>> = None;
    assert!(extract!(&node, "args", &mut args));
    let mut cursor = args.expect("args cursor");

    let mut method = "";
    assert!(extract_array(&mut cursor, [Get::from(&mut method)]));
    assert_eq!((method, cursor.position()), ("textDocument/didOpen", 1));

    let (mut version, mut ratio, mut flag) = (0i64, 0.0f64, false);
    assert!(extract_array(
        &mut cursor,
        [Get::from(&mut version), Get::from(&mut ratio), Get::from(&mut flag)]
    ));
    assert_eq!((version, ratio, flag), (3, 0.5, true));
    assert!(cursor.is_empty());
    assert!(extract_array(&mut cursor, []));
}

#[test]
fn root_arrays_are_matched_positionally() {
    let node = Node::Array(vec![Node::from("$/progress"), Node::Integer(7)]);
    let mut token = 0i64;
    assert!(extract!(&node, "$/progress", &mut token));
    assert_eq!(token, 7);
}

#[test]
fn node_and_object_slots_borrow_from_the_tree() {
    let node = tree!("result", "{", "capabilities", "{", "hoverProvider", true, "}", "}");
    let mut result: Option<&Node> = None;
    let mut capabilities: Option<&Map> = None;
    assert!(extract!(&node, "result", &mut result));
    assert!(extract(
        &node,
        [
            Get::from("result"),
            Get::from("{"),
            Get::from("capabilities"),
            Get::Object(&mut capabilities),
            Get::from("}"),
        ]
    ));
    assert!(core::ptr::eq(
        result.and_then(|r| r.get("capabilities")).and_then(Node::as_object).unwrap(),
        capabilities.unwrap()
    ));
    assert_eq!(
        capabilities.and_then(|c| c.get("hoverProvider")),
        Some(&Node::Boolean(true))
    );
}

#[test]
fn strv_reads_string_arrays() {
    let node = tree!("commands", Put::Strv(&["rust-analyzer.run", "rust-analyzer.debug"]));
    let mut commands: Vec<&str> = Vec::new();
    assert!(extract!(&node, "commands", &mut commands));
    assert_eq!(commands, ["rust-analyzer.run", "rust-analyzer.debug"]);
}

#[test]
fn null_slot_skips_any_value() {
    let node = tree!("id", 1, "result", "{", "items", "[", "]", "}");
    let mut id = 0i64;
    assert!(extract!(&node, "id", &mut id, "result", Get::Null));
    assert_eq!(id, 1);
}

#[test]
fn write_default_keeps_matching_past_wrong_scalars() {
    // Some servers send `"id": "7"` where others send `"id": 7`.
    let node = tree!("id", "7", "method", "exit");
    let codec = Codec::new(CodecOptions {
        scalar_mismatch: ScalarMismatch::WriteDefault,
        ..CodecOptions::default()
    });
    let mut id = 99i64;
    let mut method = "";
    assert!(codec.extract(
        &node,
        [Get::from("id"), Get::from(&mut id), Get::from("method"), Get::from(&mut method)]
    ));
    assert_eq!((id, method), (0, "exit"));

    // Composite kinds are still checked.
    assert!(!codec.extract(&node, [Get::from("method"), Get::from("{")]));
}

#[test]
fn end_token_stops_the_pattern() {
    let node = tree!("a", 1);
    let mut a = 0i64;
    assert!(extract(
        &node,
        [Get::from("a"), Get::from(&mut a), Get::End, Get::from("missing")]
    ));
    assert_eq!(a, 1);
}

#[test]
fn deep_nesting_round_trips() {
    const LEVELS: usize = 12;
    let mut tokens: Vec<Put<'_>> = Vec::new();
    for _ in 0..LEVELS {
        tokens.extend([Put::Raw("child"), Put::Raw("{")]);
    }
    tokens.extend([Put::Raw("leaf"), Put::Integer(12), Put::Raw("empty"), Put::Raw("[")]);
    let node: Node = crate::build(tokens);

    let mut leaf = 0i64;
    let mut patterns: Vec<Get<'_, '_>> = Vec::new();
    for _ in 0..LEVELS {
        patterns.extend([Get::Raw("child"), Get::Raw("{")]);
    }
    patterns.extend([Get::Raw("leaf"), Get::from(&mut leaf), Get::Raw("empty"), Get::Raw("["), Get::Raw("]")]);
    assert!(extract(&node, patterns));
    assert_eq!(leaf, 12);
}
