//! Integration tests for the syntax parser: entry classification, comments,
//! multiline patterns, diagnostics, and error recovery.

use parlance::parser::ast::{Entry, Expression, InlineExpression, PatternElement, VariantKey};
use parlance::parser::{parse, parse_with_spans};

fn text_of(pattern: &parlance::parser::ast::Pattern) -> String {
    let mut out = String::new();
    for element in &pattern.elements {
        if let PatternElement::Text(text) = element {
            out.push_str(&text.value);
        }
    }
    out
}

fn junk_codes(source: &str) -> Vec<String> {
    parse(source)
        .body
        .iter()
        .filter_map(|entry| match entry {
            Entry::Junk(junk) => Some(junk.annotations[0].code.clone()),
            _ => None,
        })
        .collect()
}

// === Entry classification ===

#[test]
fn simple_message() {
    let resource = parse("hello = Hello, world!");
    assert_eq!(resource.body.len(), 1);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    assert_eq!(message.id.name, "hello");
    assert_eq!(text_of(message.value.as_ref().unwrap()), "Hello, world!");
    assert!(message.attributes.is_empty());
}

#[test]
fn term_entry() {
    let resource = parse("-brand = Firefox");
    let Entry::Term(term) = &resource.body[0] else {
        panic!("expected term");
    };
    assert_eq!(term.id.name, "brand");
    assert_eq!(text_of(&term.value), "Firefox");
}

#[test]
fn message_with_attributes() {
    let resource = parse("login = Login\n    .tooltip = Click to log in");
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    assert_eq!(text_of(message.value.as_ref().unwrap()), "Login");
    assert_eq!(message.attributes.len(), 1);
    assert_eq!(message.attributes[0].id.name, "tooltip");
    assert_eq!(text_of(&message.attributes[0].value), "Click to log in");
}

#[test]
fn attributes_only_message() {
    let resource = parse("login =\n    .tooltip = Hi");
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    assert!(message.value.is_none());
    assert_eq!(message.attributes.len(), 1);
}

#[test]
fn consecutive_messages_without_blank_line() {
    let resource = parse("a = A\nb = B");
    assert_eq!(resource.body.len(), 2);
}

#[test]
fn crlf_line_endings() {
    let resource = parse("a = x\r\nb = y");
    assert_eq!(resource.body.len(), 2);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    assert_eq!(text_of(message.value.as_ref().unwrap()), "x");
}

// === Comments ===

#[test]
fn consecutive_comment_lines_merge() {
    let resource = parse("# line one\n# line two\n\nother = x");
    assert_eq!(resource.body.len(), 2);
    let Entry::Comment(comment) = &resource.body[0] else {
        panic!("expected standalone comment");
    };
    assert_eq!(comment.content, "line one\nline two");
}

#[test]
fn adjacent_comment_attaches_to_message() {
    let resource = parse("# Attached\nhello = Hi");
    assert_eq!(resource.body.len(), 1);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    assert_eq!(message.comment.as_ref().unwrap().content, "Attached");
}

#[test]
fn blank_line_keeps_comment_standalone() {
    let resource = parse("# Standalone\n\nhello = Hi");
    assert_eq!(resource.body.len(), 2);
    let Entry::Message(message) = &resource.body[1] else {
        panic!("expected message");
    };
    assert!(message.comment.is_none());
}

#[test]
fn group_and_resource_comments_never_attach() {
    let resource = parse("### Resource wide\n\n## Group\nmsg = x");
    assert!(matches!(resource.body[0], Entry::ResourceComment(_)));
    assert!(matches!(resource.body[1], Entry::GroupComment(_)));
    let Entry::Message(message) = &resource.body[2] else {
        panic!("expected message");
    };
    assert!(message.comment.is_none());
}

#[test]
fn comment_attaches_to_term() {
    let resource = parse("# Brand name\n-brand = Firefox");
    let Entry::Term(term) = &resource.body[0] else {
        panic!("expected term");
    };
    assert_eq!(term.comment.as_ref().unwrap().content, "Brand name");
}

// === Multiline patterns ===

#[test]
fn common_indentation_is_stripped() {
    let resource = parse("key =\n    first\n      second\n    third");
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    assert_eq!(
        text_of(message.value.as_ref().unwrap()),
        "first\n  second\nthird"
    );
}

#[test]
fn blank_continuation_line_contributes_newline() {
    let resource = parse("key = a\n\n    b");
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    assert_eq!(text_of(message.value.as_ref().unwrap()), "a\n\nb");
}

#[test]
fn trailing_blank_is_trimmed() {
    for source in ["key = a   ", "key = a\n", "key = a  \n"] {
        let resource = parse(source);
        let Entry::Message(message) = &resource.body[0] else {
            panic!("expected message");
        };
        assert_eq!(text_of(message.value.as_ref().unwrap()), "a", "{source:?}");
    }
}

#[test]
fn placeable_on_continuation_line() {
    let resource = parse("key =\n    { $a }: { $b }");
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    let elements = &message.value.as_ref().unwrap().elements;
    assert_eq!(elements.len(), 3);
    assert!(matches!(elements[0], PatternElement::Placeable(_)));
    assert!(matches!(elements[2], PatternElement::Placeable(_)));
}

// === Expressions ===

#[test]
fn placeable_variable_reference() {
    let resource = parse("key = Hello, { $name }!");
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    let elements = &message.value.as_ref().unwrap().elements;
    assert_eq!(elements.len(), 3);
    let PatternElement::Placeable(placeable) = &elements[1] else {
        panic!("expected placeable");
    };
    let Expression::Inline(InlineExpression::VariableReference(variable)) = &placeable.expression
    else {
        panic!("expected variable reference");
    };
    assert_eq!(variable.id.name, "name");
}

#[test]
fn select_expression_structure() {
    let source = "key = { $count ->\n    [one] item\n   *[other] items\n}";
    let resource = parse(source);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    let elements = &message.value.as_ref().unwrap().elements;
    let PatternElement::Placeable(placeable) = &elements[0] else {
        panic!("expected placeable");
    };
    let Expression::Select(select) = &placeable.expression else {
        panic!("expected select expression");
    };
    assert!(matches!(
        select.selector,
        InlineExpression::VariableReference(_)
    ));
    assert_eq!(select.variants.len(), 2);
    assert!(!select.variants[0].default);
    assert!(select.variants[1].default);
    assert_eq!(text_of(&select.variants[0].value), "item");
    assert_eq!(text_of(&select.variants[1].value), "items");
}

#[test]
fn numeric_variant_keys() {
    let source = "key = { $n ->\n    [0] none\n    [1.50] rare\n   *[other] some\n}";
    let resource = parse(source);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::Select(select) = &placeable.expression else {
        panic!("expected select");
    };
    let VariantKey::NumberLiteral(zero) = &select.variants[0].key else {
        panic!("expected number key");
    };
    assert_eq!(zero.raw, "0");
    assert_eq!(zero.value, 0.0);
    assert_eq!(zero.precision, 0);
    let VariantKey::NumberLiteral(rare) = &select.variants[1].key else {
        panic!("expected number key");
    };
    assert_eq!(rare.raw, "1.50");
    assert_eq!(rare.value, 1.5);
    assert_eq!(rare.precision, 2);
}

#[test]
fn term_call_arguments() {
    let resource = parse(r#"key = { -brand.gender(case: "nom") }"#);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::Inline(InlineExpression::TermReference(reference)) = &placeable.expression
    else {
        panic!("expected term reference");
    };
    assert_eq!(reference.id.name, "brand");
    assert_eq!(reference.attribute.as_ref().unwrap().name, "gender");
    let arguments = reference.arguments.as_ref().unwrap();
    assert!(arguments.positional.is_empty());
    assert_eq!(arguments.named.len(), 1);
    assert_eq!(arguments.named[0].name.name, "case");
}

// === String literals and escapes ===

#[test]
fn string_literal_unescapes_on_demand() {
    let resource = parse(r#"key = { "\u0041\\\"" }"#);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::Inline(InlineExpression::StringLiteral(literal)) = &placeable.expression
    else {
        panic!("expected string literal");
    };
    assert_eq!(literal.raw, r#"\u0041\\\""#);
    assert_eq!(literal.value(), "A\\\"");
}

#[test]
fn surrogate_escape_becomes_replacement_character() {
    let resource = parse(r#"key = { "\uD800" }"#);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::Inline(InlineExpression::StringLiteral(literal)) = &placeable.expression
    else {
        panic!("expected string literal");
    };
    assert_eq!(literal.value(), "\u{FFFD}");
}

#[test]
fn six_digit_unicode_escape() {
    let resource = parse(r#"key = { "\U01F602" }"#);
    let Entry::Message(message) = &resource.body[0] else {
        panic!("expected message");
    };
    let PatternElement::Placeable(placeable) = &message.value.as_ref().unwrap().elements[0] else {
        panic!("expected placeable");
    };
    let Expression::Inline(InlineExpression::StringLiteral(literal)) = &placeable.expression
    else {
        panic!("expected string literal");
    };
    assert_eq!(literal.value(), "\u{1F602}");
}

// === Diagnostics ===

#[test]
fn invalid_entry_start_is_junk() {
    assert_eq!(junk_codes("??\n\nok = fine"), vec!["E0002"]);
    let resource = parse("??\n\nok = fine");
    assert!(matches!(resource.body[1], Entry::Message(_)));
}

#[test]
fn missing_token_reports_the_token() {
    let resource = parse("a b = c");
    let Entry::Junk(junk) = &resource.body[0] else {
        panic!("expected junk");
    };
    assert_eq!(junk.annotations[0].code, "E0003");
    assert_eq!(junk.annotations[0].arguments, vec!["=".to_string()]);
    assert_eq!(junk.annotations[0].message, "Expected token: \"=\"");
}

#[test]
fn message_without_value_or_attributes() {
    assert_eq!(junk_codes("msg =\n"), vec!["E0005"]);
}

#[test]
fn term_without_value() {
    let resource = parse("-term =\n");
    let Entry::Junk(junk) = &resource.body[0] else {
        panic!("expected junk");
    };
    assert_eq!(junk.annotations[0].code, "E0006");
    assert_eq!(junk.content, "-term =\n");
}

#[test]
fn select_without_default_variant() {
    let source = "a = { $n ->\n    [one] x\n    [other] y\n}";
    assert_eq!(junk_codes(source), vec!["E0010"]);
}

#[test]
fn select_with_two_default_variants() {
    let source = "a = { $n ->\n   *[one] x\n   *[other] y\n}";
    assert_eq!(junk_codes(source), vec!["E0015"]);
}

#[test]
fn single_default_variant_is_accepted() {
    let source = "a = { $n ->\n   *[other] y\n}";
    assert!(junk_codes(source).is_empty());
}

#[test]
fn illegal_selectors() {
    assert_eq!(
        junk_codes("a = { msg ->\n   *[other] x\n}"),
        vec!["E0016"]
    );
    assert_eq!(
        junk_codes("a = { -term ->\n   *[other] x\n}"),
        vec!["E0017"]
    );
    assert_eq!(
        junk_codes("a = { msg.attr ->\n   *[other] x\n}"),
        vec!["E0018"]
    );
}

#[test]
fn term_attribute_is_a_legal_selector() {
    let source = "a = { -term.attr ->\n   *[other] x\n}";
    assert!(junk_codes(source).is_empty());
}

#[test]
fn unterminated_string_literal() {
    assert_eq!(junk_codes("a = { \"oops }\n"), vec!["E0020"]);
}

#[test]
fn positional_argument_after_named() {
    assert_eq!(
        junk_codes("a = { NUMBER(style: \"x\", 1) }"),
        vec!["E0021"]
    );
}

#[test]
fn duplicate_named_argument() {
    let resource = parse("a = { NUMBER(1, opt: \"a\", opt: \"b\") }");
    let Entry::Junk(junk) = &resource.body[0] else {
        panic!("expected junk");
    };
    assert_eq!(junk.annotations[0].code, "E0022");
    assert_eq!(junk.annotations[0].arguments, vec!["opt".to_string()]);
}

#[test]
fn invalid_escape_sequence() {
    assert_eq!(junk_codes("a = { \"\\q\" }"), vec!["E0025"]);
}

#[test]
fn invalid_unicode_escape_sequence() {
    assert_eq!(junk_codes("a = { \"\\uZZZZ\" }"), vec!["E0026"]);
}

#[test]
fn unbalanced_closing_brace() {
    assert_eq!(junk_codes("a = b }"), vec!["E0027"]);
}

#[test]
fn nested_placeable() {
    assert_eq!(junk_codes("a = { { 1 } }"), vec!["E0029"]);
}

#[test]
fn lower_case_callee_is_forbidden() {
    assert_eq!(junk_codes("a = { number(1) }"), vec!["E0008"]);
}

#[test]
fn recovery_continues_after_junk() {
    let source = "ok-one = fine\n\n??? broken\n\nok-two = also fine";
    let resource = parse(source);
    assert_eq!(resource.body.len(), 3);
    assert!(matches!(resource.body[0], Entry::Message(_)));
    assert!(matches!(resource.body[1], Entry::Junk(_)));
    assert!(matches!(resource.body[2], Entry::Message(_)));
}

#[test]
fn recovery_stops_at_next_entry_start() {
    let source = "??? broken\nok = fine";
    let resource = parse(source);
    assert_eq!(resource.body.len(), 2);
    let Entry::Junk(junk) = &resource.body[0] else {
        panic!("expected junk");
    };
    assert_eq!(junk.content, "??? broken\n");
    assert!(matches!(resource.body[1], Entry::Message(_)));
}

// === Robustness ===

#[test]
fn parse_never_fails() {
    let adversarial = [
        "",
        " ",
        "\n\n\n",
        "=",
        "{",
        "}",
        "a",
        "a =",
        "a = {",
        "a = { $",
        "a = { NUMBER(",
        "a = { \"",
        "-",
        "-x",
        "####",
        "# x\n#",
        "[x]",
        "*",
        ".attr = x",
        "a = { $n ->",
        "a = { $n ->\n",
        "\u{FEFF}key = value",
        "key = \u{2068}bidi\u{2069}",
    ];
    for source in adversarial {
        let resource = parse(source);
        let _ = resource.body.len();
    }
}

// === Spans ===

#[test]
fn spans_attach_only_on_request() {
    let source = "hello = Hi";
    let plain = parse(source);
    let spanned = parse_with_spans(source);

    let Entry::Message(message) = &plain.body[0] else {
        panic!("expected message");
    };
    assert!(message.span.is_none());

    let Entry::Message(message) = &spanned.body[0] else {
        panic!("expected message");
    };
    let span = message.span.unwrap();
    assert_eq!(span.start.offset, 0);
    assert_eq!(span.start.line, 1);
    assert_eq!(span.start.column, 1);

    // Spans are excluded from structural equality.
    assert_eq!(plain, spanned);
}

#[test]
fn junk_annotation_spans() {
    let resource = parse_with_spans("a b = c");
    let Entry::Junk(junk) = &resource.body[0] else {
        panic!("expected junk");
    };
    let span = junk.annotations[0].span.unwrap();
    assert_eq!(span.start.offset, 2);
    assert_eq!(span.start.column, 3);
}
