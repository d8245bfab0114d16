//! Integration tests for select expressions: plural classification, exact
//! numeric keys, string matching, and default fallback.

use parlance::{Bundle, args, parse};

fn bundle(locale: &str, source: &str) -> Bundle {
    let mut bundle = Bundle::builder()
        .locale(locale)
        .use_isolating(false)
        .build();
    bundle.add_resource(parse(source));
    bundle
}

const ITEMS: &str = "items = { $count ->\n    [one] one item\n   *[other] { $count } items\n}";

// === Plural categories ===

#[test]
fn english_plural_selection() {
    let bundle = bundle("en", ITEMS);
    assert_eq!(
        bundle.format("items", Some(&args! { "count" => 1 }), None),
        "one item"
    );
    assert_eq!(
        bundle.format("items", Some(&args! { "count" => 2 }), None),
        "2 items"
    );
    assert_eq!(
        bundle.format("items", Some(&args! { "count" => 0 }), None),
        "0 items"
    );
}

#[test]
fn russian_plural_selection() {
    let source = "files = { $count ->\n    [one] one-form\n    [few] few-form\n    [many] many-form\n   *[other] other-form\n}";
    let bundle = bundle("ru", source);
    let format = |count: i64| bundle.format("files", Some(&args! { "count" => count }), None);
    assert_eq!(format(1), "one-form");
    assert_eq!(format(2), "few-form");
    assert_eq!(format(5), "many-form");
    assert_eq!(format(21), "one-form");
    assert_eq!(format(22), "few-form");
}

#[test]
fn declared_precision_counts_as_visible_digits() {
    // NUMBER adds a visible fraction digit; English then classifies 1.0 as
    // "other" rather than "one".
    let source = "n = { NUMBER($v, minimumFractionDigits: 1) ->\n    [one] one\n   *[other] other\n}\nm = { $v ->\n    [one] one\n   *[other] other\n}";
    let bundle = bundle("en", source);
    assert_eq!(bundle.format("n", Some(&args! { "v" => 1 }), None), "other");
    assert_eq!(bundle.format("m", Some(&args! { "v" => 1 }), None), "one");
}

// === Exact numeric keys ===

#[test]
fn exact_numeric_key_beats_plural_category() {
    let source = "n = { $count ->\n    [0] no items\n   *[other] { $count } items\n}";
    let bundle = bundle("en", source);
    assert_eq!(
        bundle.format("n", Some(&args! { "count" => 0 }), None),
        "no items"
    );
    assert_eq!(
        bundle.format("n", Some(&args! { "count" => 3 }), None),
        "3 items"
    );
}

#[test]
fn exact_match_wins_regardless_of_variant_order() {
    let source = "n = { $count ->\n   *[other] other\n    [1] exactly one\n}";
    let bundle = bundle("en", source);
    assert_eq!(
        bundle.format("n", Some(&args! { "count" => 1 }), None),
        "exactly one"
    );
}

#[test]
fn fractional_numeric_key() {
    let source = "n = { $x ->\n    [1.5] halfway\n   *[other] elsewhere\n}";
    let bundle = bundle("en", source);
    assert_eq!(
        bundle.format("n", Some(&args! { "x" => 1.5 }), None),
        "halfway"
    );
}

// === String selectors ===

#[test]
fn string_selector_matches_identifier_keys() {
    let source = "c = { $color ->\n    [red] warm\n    [blue] cold\n   *[other] unknown\n}";
    let bundle = bundle("en", source);
    assert_eq!(
        bundle.format("c", Some(&args! { "color" => "red" }), None),
        "warm"
    );
    assert_eq!(
        bundle.format("c", Some(&args! { "color" => "blue" }), None),
        "cold"
    );
    assert_eq!(
        bundle.format("c", Some(&args! { "color" => "green" }), None),
        "unknown"
    );
}

#[test]
fn term_attribute_selector() {
    let source = "-brand = Firefox\n    .gender = masc\narticle = { -brand.gender ->\n    [masc] Der\n   *[fem] Die\n}";
    let bundle = bundle("de", source);
    assert_eq!(bundle.format("article", None, None), "Der");
}

// === Failure fallback ===

#[test]
fn missing_selector_variable_falls_back_to_default() {
    let bundle = bundle("en", ITEMS);
    let mut errors = Vec::new();
    let output = bundle.format("items", None, Some(&mut errors));
    assert_eq!(output, "{$count} items");
    assert!(!errors.is_empty());
}
