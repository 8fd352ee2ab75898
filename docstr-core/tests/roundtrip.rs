//! Round-trip and idempotence guarantees of the canonical formatter.

use docstr_core::{format_document, format_source, parse, DocNode};

const GOOGLE_DOC: &str = "\
Example function with types documented in the docstring.

Args:
    param0: No type
    param1 (int): The first parameter.
    param2 (str): The second parameter.
        more

Returns:
    bool: The return value.
";

const NUMPY_DOC: &str = "\
Sum two numbers.

Parameters
----------
x : int
    The first operand.
y : int, optional
    The second operand.

Returns
-------
int
    The computed sum.
";

fn assert_round_trip_stable(text: &str, style: &str) {
    let parsed = parse(text, style).unwrap();
    let formatted = format_document(&parsed, style).unwrap();
    let reparsed = parse(&formatted, style).unwrap();
    assert_eq!(parsed, reparsed, "tree changed across format/reparse");
}

fn assert_idempotent(text: &str, style: &str) {
    let once = format_source(text, style).unwrap();
    let twice = format_source(&once, style).unwrap();
    assert_eq!(once, twice, "formatting is not idempotent");
}

#[test]
fn google_round_trip_is_stable() {
    assert_round_trip_stable(GOOGLE_DOC, "google");
}

#[test]
fn numpy_round_trip_is_stable() {
    assert_round_trip_stable(NUMPY_DOC, "numpy");
}

#[test]
fn google_formatting_is_idempotent() {
    assert_idempotent(GOOGLE_DOC, "google");
}

#[test]
fn numpy_formatting_is_idempotent() {
    assert_idempotent(NUMPY_DOC, "numpy");
}

#[test]
fn excess_blank_lines_collapse() {
    let formatted = format_source("One.\n\n\n\nTwo.\n", "google").unwrap();
    assert_eq!(formatted, "One.\n\nTwo.\n");
}

#[test]
fn literal_block_round_trips_byte_for_byte() {
    let text = "\
Top.

Example::

    {
        'a': 1,
    }
";
    let parsed = parse(text, "google").unwrap();
    let code = parsed
        .sections()
        .flat_map(|s| s.body.iter())
        .find_map(|node| match node {
            DocNode::Code(code) => Some(code),
            _ => None,
        })
        .expect("literal block missing");
    assert_eq!(code.code, vec!["{", "    'a': 1,", "}"]);

    let formatted = format_document(&parsed, "google").unwrap();
    assert_eq!(formatted, "Top.\n\nExample::\n    {\n        'a': 1,\n    }\n");
    assert_round_trip_stable(text, "google");
    assert_idempotent(text, "google");
}

#[test]
fn code_directive_round_trips_with_language() {
    let text = "Top.\n\n.. code:: python\n    def f(x):\n        return x\n";
    assert_round_trip_stable(text, "google");
    assert_idempotent(text, "google");

    let formatted = format_source(text, "google").unwrap();
    assert_eq!(
        formatted,
        "Top.\n\n.. code:: python\n    def f(x):\n        return x\n"
    );
}

#[test]
fn blank_lines_inside_code_are_preserved() {
    let text = "Top.\n\n::\n    first\n\n    second\n";
    let formatted = format_source(text, "google").unwrap();
    assert_eq!(formatted, "Top.\n\n::\n    first\n\n    second\n");
    assert_round_trip_stable(text, "google");
}

#[test]
fn nested_continuations_round_trip() {
    let text = "\
Lead.

Example:
    outer paragraph
        inner block
            innermost
";
    assert_round_trip_stable(text, "google");
    assert_idempotent(text, "google");
}

#[test]
fn cross_style_rendering_keeps_items() {
    // A google docstring re-rendered in numpy keeps names and types.
    let parsed = parse(GOOGLE_DOC, "google").unwrap();
    let numpy_text = format_document(&parsed, "numpy").unwrap();
    assert!(numpy_text.contains("Args\n----\n"));
    assert!(numpy_text.contains("param1 : int\n    The first parameter.\n"));

    let reparsed = parse(&numpy_text, "numpy").unwrap();
    let DocNode::Item(item) = &reparsed["Args"].body[1] else {
        panic!("expected item");
    };
    assert_eq!(item.name, "param1");
    assert_eq!(item.ty.as_deref(), Some("int"));
    assert_eq!(item.desc, "The first parameter.");
}
