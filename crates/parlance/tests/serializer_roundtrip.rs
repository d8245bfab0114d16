//! Round-trip tests for the serializer: re-parsing the serialization of a
//! parsed resource yields a structurally equal resource.

use parlance::{parse, serialize};

fn roundtrip(source: &str) {
    let first = parse(source);
    let rendered = serialize(&first);
    let second = parse(&rendered);
    assert_eq!(first, second, "serialized form:\n{rendered}");
}

#[test]
fn simple_entries() {
    roundtrip("hello = Hello, world!");
    roundtrip("hello = Hello, { $name }!");
    roundtrip("-brand = Firefox");
    roundtrip("a = A\n\nb = B");
}

#[test]
fn attributes() {
    roundtrip("login = Login\n    .tooltip = Click");
    roundtrip("login =\n    .tooltip = Only an attribute");
    roundtrip("-brand = Firefox\n    .gender = masc\n    .case = nom");
}

#[test]
fn multiline_values() {
    roundtrip("key =\n    first\n      second\n    third");
    roundtrip("key = a\n\n    b");
    roundtrip("key =\n    leading\n        deeply indented\n    back");
}

#[test]
fn literals_and_calls() {
    roundtrip(r#"key = { "quo\"ted" }"#);
    roundtrip("key = { 3.14 }");
    roundtrip("key = { -42 }");
    roundtrip(r#"key = { -brand.gender(case: "nom") }"#);
    roundtrip(r#"key = { NUMBER($n, minimumFractionDigits: 2) }"#);
    roundtrip(r#"key = { NUMBER(1, 2, opt: "x") }"#);
    roundtrip("key = { msg.attr }");
}

#[test]
fn select_expressions() {
    roundtrip("key = { $count ->\n    [one] item\n   *[other] items\n}");
    roundtrip("key = { $n ->\n    [0] none\n    [one] one\n   *[other] { $n } items\n}");
    roundtrip(
        "key = { -term.attr ->\n    [masc] Der\n   *[fem] Die\n}",
    );
}

#[test]
fn multiline_variant_value() {
    let source = "key = { $n ->\n   *[other]\n        line one\n        line two\n}";
    roundtrip(source);
}

#[test]
fn comments() {
    roundtrip("# standalone\n\nmsg = x");
    roundtrip("# attached\nmsg = x");
    roundtrip("# first line\n# second line\n\nmsg = x");
    roundtrip("## group\n\n### resource\n\nmsg = x");
    roundtrip("# on a term\n-brand = Firefox");
}

#[test]
fn junk_is_preserved_verbatim() {
    roundtrip("??? broken\n\nok = fine");
    roundtrip("ok = fine\n\n??? broken");
}

#[test]
fn mixed_resource() {
    let source = "### App strings\n\n# The brand.\n-brand = Firefox\n    .gender = masc\n\nwelcome = Welcome to { -brand }!\n    .title = { -brand.gender ->\n        [masc] Der Browser\n       *[fem] Die Anwendung\n    }\n\ncount = { $n ->\n    [one] one\n   *[other] { NUMBER($n, minimumFractionDigits: 1) }\n}";
    roundtrip(source);
}

#[test]
fn serialization_is_stable() {
    let source = "# doc\nkey =\n    first\n      second\n\nother = { $n ->\n   *[other] x\n}";
    let once = serialize(&parse(source));
    let twice = serialize(&parse(&once));
    assert_eq!(once, twice);
}
