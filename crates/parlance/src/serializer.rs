//! Source-text serializer: the inverse of the parser.
//!
//! Round-trip contract: for any syntactically valid source `s`, re-parsing
//! `serialize(&parse(s))` yields a resource structurally equal (ignoring
//! spans) to `parse(s)`. Comment attachment, blank-line entry separation, and
//! multiline re-indentation are preserved; string literals re-emit their raw
//! text, which is already minimally escaped.

use crate::parser::ast::{
    Attribute, CallArguments, Comment, Entry, Expression, InlineExpression, Message, Pattern,
    PatternElement, Resource, SelectExpression, Term, VariantKey,
};

/// Reconstructs source text from a resource.
///
/// # Example
///
/// ```
/// use parlance::parser::parse;
/// use parlance::serializer::serialize;
///
/// let source = "hello = Hello, { $name }!\n";
/// let resource = parse(source);
/// assert_eq!(serialize(&resource), source);
/// ```
pub fn serialize(resource: &Resource) -> String {
    let mut out = String::new();
    let last = resource.body.len().saturating_sub(1);
    for (index, entry) in resource.body.iter().enumerate() {
        match entry {
            Entry::Message(message) => write_message(&mut out, message),
            Entry::Term(term) => write_term(&mut out, term),
            Entry::Comment(comment) => write_comment(&mut out, comment, "#"),
            Entry::GroupComment(comment) => write_comment(&mut out, comment, "##"),
            Entry::ResourceComment(comment) => write_comment(&mut out, comment, "###"),
            Entry::Junk(junk) => {
                out.push_str(&junk.content);
                if index < last && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
        if index < last {
            out.push('\n');
        }
    }
    out
}

fn write_comment(out: &mut String, comment: &Comment, marker: &str) {
    for line in comment.content.split('\n') {
        out.push_str(marker);
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn write_message(out: &mut String, message: &Message) {
    if let Some(comment) = &message.comment {
        write_comment(out, comment, "#");
    }
    out.push_str(&message.id.name);
    out.push_str(" =");
    if let Some(value) = &message.value {
        write_pattern_value(out, value, 1);
    }
    out.push('\n');
    write_attributes(out, &message.attributes);
}

fn write_term(out: &mut String, term: &Term) {
    if let Some(comment) = &term.comment {
        write_comment(out, comment, "#");
    }
    out.push('-');
    out.push_str(&term.id.name);
    out.push_str(" =");
    write_pattern_value(out, &term.value, 1);
    out.push('\n');
    write_attributes(out, &term.attributes);
}

fn write_attributes(out: &mut String, attributes: &[Attribute]) {
    for attribute in attributes {
        out.push_str("    .");
        out.push_str(&attribute.id.name);
        out.push_str(" =");
        write_pattern_value(out, &attribute.value, 2);
        out.push('\n');
    }
}

/// Appends a pattern after an `=` sign, choosing inline or block form.
///
/// Block form re-indents every value line by `indent` four-space units;
/// re-parsing strips exactly that common indentation, recovering the original
/// value.
fn write_pattern_value(out: &mut String, pattern: &Pattern, indent: usize) {
    let (render, block) = render_pattern(pattern);
    if block {
        let prefix = "    ".repeat(indent);
        out.push('\n');
        out.push_str(&prefix);
        out.push_str(&render.replace('\n', &format!("\n{prefix}")));
    } else {
        out.push(' ');
        out.push_str(&render);
    }
}

/// Renders a pattern into its value text, reporting whether it must be
/// written in block form: multiline values, values with a leading space, and
/// select expressions all start on their own line.
fn render_pattern(pattern: &Pattern) -> (String, bool) {
    let mut render = String::new();
    let mut block = false;
    for element in &pattern.elements {
        match element {
            PatternElement::Text(text) => render.push_str(&text.value),
            PatternElement::Placeable(placeable) => {
                if matches!(placeable.expression, Expression::Select(_)) {
                    block = true;
                }
                render.push_str(&render_placeable(&placeable.expression));
            }
        }
    }
    if render.contains('\n') || render.starts_with(' ') {
        block = true;
    }
    (render, block)
}

fn render_placeable(expression: &Expression) -> String {
    match expression {
        Expression::Inline(inline) => format!("{{ {} }}", render_inline(inline)),
        Expression::Select(select) => render_select(select),
    }
}

fn render_select(select: &SelectExpression) -> String {
    let mut out = format!("{{ {} ->\n", render_inline(&select.selector));
    for variant in &select.variants {
        let key = match &variant.key {
            VariantKey::Identifier(id) => id.name.clone(),
            VariantKey::NumberLiteral(number) => number.raw.clone(),
        };
        if variant.default {
            out.push_str("   *[");
        } else {
            out.push_str("    [");
        }
        out.push_str(&key);
        out.push(']');
        let (render, block) = render_pattern(&variant.value);
        if block {
            out.push_str("\n        ");
            out.push_str(&render.replace('\n', "\n        "));
        } else {
            out.push(' ');
            out.push_str(&render);
        }
        out.push('\n');
    }
    out.push('}');
    out
}

fn render_inline(expression: &InlineExpression) -> String {
    match expression {
        InlineExpression::StringLiteral(literal) => format!("\"{}\"", literal.raw),
        InlineExpression::NumberLiteral(number) => number.raw.clone(),
        InlineExpression::VariableReference(variable) => format!("${}", variable.id.name),
        InlineExpression::MessageReference(reference) => match &reference.attribute {
            Some(attribute) => format!("{}.{}", reference.id.name, attribute.name),
            None => reference.id.name.clone(),
        },
        InlineExpression::TermReference(reference) => {
            let mut out = format!("-{}", reference.id.name);
            if let Some(attribute) = &reference.attribute {
                out.push('.');
                out.push_str(&attribute.name);
            }
            if let Some(arguments) = &reference.arguments {
                out.push_str(&render_arguments(arguments));
            }
            out
        }
        InlineExpression::FunctionReference(reference) => {
            format!("{}{}", reference.id.name, render_arguments(&reference.arguments))
        }
    }
}

fn render_arguments(arguments: &CallArguments) -> String {
    let rendered: Vec<String> = arguments
        .positional
        .iter()
        .map(render_inline)
        .chain(
            arguments
                .named
                .iter()
                .map(|named| format!("{}: {}", named.name.name, render_inline(&named.value))),
        )
        .collect();
    format!("({})", rendered.join(", "))
}
