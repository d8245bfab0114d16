//! Pattern and expression resolution.
//!
//! Resolution walks a pattern tree and writes display text: literal text
//! verbatim, placeables as the rendered value of their expression. Failures
//! never abort the walk; they substitute a visible placeholder (`{$var}`,
//! `{id}`, `{-id.attr}`, `{NAME()}`) and record an error in the scope, so
//! sibling elements resolve unaffected.

use crate::parser::ast::{
    Attribute, Expression, FunctionReference, InlineExpression, Pattern, PatternElement,
    SelectExpression, TermReference, VariantKey,
};
use crate::types::{Args, NumberValue, Value};

use super::errors::ResolverError;
use super::plural::plural_category;
use super::scope::Scope;

/// First-strong isolate / pop-directional-isolate marks wrapped around
/// placeable output when the bundle has isolation enabled.
const FSI: char = '\u{2068}';
const PDI: char = '\u{2069}';

pub(crate) fn write_pattern(pattern: &Pattern, scope: &mut Scope<'_, '_>, output: &mut String) {
    // A lone placeable is already the whole output; isolation marks would
    // only add noise around it.
    let isolate = scope.bundle.isolating() && pattern.elements.len() > 1;
    for element in &pattern.elements {
        match element {
            PatternElement::Text(text) => output.push_str(&text.value),
            PatternElement::Placeable(placeable) => {
                if isolate {
                    output.push(FSI);
                }
                write_expression(&placeable.expression, scope, output);
                if isolate {
                    output.push(PDI);
                }
            }
        }
    }
}

fn write_expression(expression: &Expression, scope: &mut Scope<'_, '_>, output: &mut String) {
    match expression {
        Expression::Inline(inline) => write_inline(inline, scope, output),
        Expression::Select(select) => match select_variant(select, scope) {
            Some(variant) => write_pattern(variant, scope, output),
            None => {
                scope.error(ResolverError::MissingDefault);
                output.push_str("???");
            }
        },
    }
}

fn write_inline(expression: &InlineExpression, scope: &mut Scope<'_, '_>, output: &mut String) {
    let locale = scope.bundle.locale().to_string();
    match expression {
        InlineExpression::StringLiteral(literal) => output.push_str(&literal.value()),
        InlineExpression::NumberLiteral(literal) => {
            output.push_str(&NumberValue::from_literal(literal).format(&locale));
        }
        InlineExpression::VariableReference(variable) => {
            let name = &variable.id.name;
            match scope.variable(name) {
                Some(value) => {
                    let rendered = value.format(&locale);
                    output.push_str(&rendered);
                }
                None => {
                    scope.error(ResolverError::UnknownVariable { name: name.clone() });
                    output.push_str(&format!("{{${name}}}"));
                }
            }
        }
        InlineExpression::MessageReference(reference) => {
            let display = match &reference.attribute {
                Some(attribute) => format!("{}.{}", reference.id.name, attribute.name),
                None => reference.id.name.clone(),
            };
            let Some(message) = scope.bundle.get_message(&reference.id.name) else {
                scope.error(ResolverError::UnknownMessage {
                    id: reference.id.name.clone(),
                });
                output.push_str(&format!("{{{display}}}"));
                return;
            };
            let pattern = match &reference.attribute {
                Some(attribute) => {
                    let Some(pattern) = find_attribute(&message.attributes, &attribute.name) else {
                        scope.error(ResolverError::UnknownAttribute {
                            reference: display.clone(),
                        });
                        output.push_str(&format!("{{{display}}}"));
                        return;
                    };
                    pattern
                }
                None => {
                    let Some(pattern) = &message.value else {
                        scope.error(ResolverError::NoValue {
                            id: reference.id.name.clone(),
                        });
                        output.push_str(&format!("{{{display}}}"));
                        return;
                    };
                    pattern
                }
            };
            write_tracked(&display, pattern, scope, output);
        }
        InlineExpression::TermReference(reference) => {
            let display = term_display(reference);
            let Some(term) = scope.bundle.get_term(&reference.id.name) else {
                scope.error(ResolverError::UnknownTerm {
                    id: reference.id.name.clone(),
                });
                output.push_str(&format!("{{{display}}}"));
                return;
            };
            let pattern = match &reference.attribute {
                Some(attribute) => match find_attribute(&term.attributes, &attribute.name) {
                    Some(pattern) => pattern,
                    None => {
                        scope.error(ResolverError::UnknownAttribute {
                            reference: display.clone(),
                        });
                        output.push_str(&format!("{{{display}}}"));
                        return;
                    }
                },
                None => &term.value,
            };
            let locals = term_locals(reference, scope);
            scope.with_locals(locals, |scope| {
                write_tracked(&display, pattern, scope, output);
            });
        }
        InlineExpression::FunctionReference(reference) => {
            let name = &reference.id.name;
            match call_function(reference, scope) {
                Some(Value::Error(message)) => {
                    scope.error(ResolverError::Function { message });
                    output.push_str(&format!("{{{name}()}}"));
                }
                Some(value) => output.push_str(&value.format(&locale)),
                None => {
                    scope.error(ResolverError::UnknownFunction { name: name.clone() });
                    output.push_str(&format!("{{{name}()}}"));
                }
            }
        }
    }
}

/// Resolves a referenced pattern under the cycle guard.
///
/// The id is tracked before descending and released once resolution of this
/// reference completes, so unrelated later references to the same id resolve
/// normally. A reference already on the active path aborts immediately with
/// a placeholder; the rest of the enclosing pattern is unaffected.
fn write_tracked(display: &str, pattern: &Pattern, scope: &mut Scope<'_, '_>, output: &mut String) {
    if !scope.track(display) {
        scope.error(ResolverError::CircularReference {
            id: display.to_string(),
        });
        output.push_str(&format!("{{{display}}}"));
        return;
    }
    write_pattern(pattern, scope, output);
    scope.release(display);
}

/// Evaluates an inline expression to a scalar value, for selectors and call
/// arguments. Message references and whole-term references do not reduce to
/// scalars and yield an error value.
fn resolve_inline(expression: &InlineExpression, scope: &mut Scope<'_, '_>) -> Value {
    match expression {
        InlineExpression::StringLiteral(literal) => Value::String(literal.value().into_owned()),
        InlineExpression::NumberLiteral(literal) => {
            Value::Number(NumberValue::from_literal(literal))
        }
        InlineExpression::VariableReference(variable) => {
            let name = &variable.id.name;
            match scope.variable(name) {
                Some(value) => value.clone(),
                None => {
                    scope.error(ResolverError::UnknownVariable { name: name.clone() });
                    Value::Error(format!("Unknown variable: ${name}"))
                }
            }
        }
        InlineExpression::FunctionReference(reference) => match call_function(reference, scope) {
            Some(Value::Error(message)) => {
                scope.error(ResolverError::Function {
                    message: message.clone(),
                });
                Value::Error(message)
            }
            Some(value) => value,
            None => {
                scope.error(ResolverError::UnknownFunction {
                    name: reference.id.name.clone(),
                });
                Value::Error(format!("Unknown function: {}()", reference.id.name))
            }
        },
        InlineExpression::TermReference(reference) => {
            // Whole terms are patterns, not scalars; only their attributes
            // reduce to values.
            let Some(attribute) = &reference.attribute else {
                return Value::Error(format!("-{} is not a value", reference.id.name));
            };
            let display = term_display(reference);
            let Some(term) = scope.bundle.get_term(&reference.id.name) else {
                scope.error(ResolverError::UnknownTerm {
                    id: reference.id.name.clone(),
                });
                return Value::Error(format!("Unknown term: -{}", reference.id.name));
            };
            let Some(pattern) = find_attribute(&term.attributes, &attribute.name) else {
                scope.error(ResolverError::UnknownAttribute {
                    reference: display.clone(),
                });
                return Value::Error(format!("Unknown attribute: {display}"));
            };
            let locals = term_locals(reference, scope);
            let mut rendered = String::new();
            scope.with_locals(locals, |scope| {
                write_tracked(&display, pattern, scope, &mut rendered);
            });
            Value::String(rendered)
        }
        InlineExpression::MessageReference(reference) => {
            Value::Error(format!("{} is not a value", reference.id.name))
        }
    }
}

/// Binds a term call's locals from its named arguments. Positional
/// arguments to a term are inert: they are not evaluated and not bound.
fn term_locals(reference: &TermReference, scope: &mut Scope<'_, '_>) -> Args {
    let mut locals = Args::new();
    if let Some(arguments) = &reference.arguments {
        for named in &arguments.named {
            let value = resolve_inline(&named.value, scope);
            locals.insert(named.name.name.clone(), value);
        }
    }
    locals
}

/// Invokes a registered function; `None` means the function is unknown.
fn call_function(reference: &FunctionReference, scope: &mut Scope<'_, '_>) -> Option<Value> {
    scope.bundle.functions().get(&reference.id.name)?;
    let positional: Vec<Value> = reference
        .arguments
        .positional
        .iter()
        .map(|argument| resolve_inline(argument, scope))
        .collect();
    let mut named = Args::new();
    for argument in &reference.arguments.named {
        let value = resolve_inline(&argument.value, scope);
        named.insert(argument.name.name.clone(), value);
    }
    let function = scope.bundle.functions().get(&reference.id.name)?;
    Some(function(&positional, &named, scope.bundle.locale()))
}

/// Picks the variant a selector value matches.
///
/// Numeric match values try exact equality against number-literal keys
/// first, then their plural category against identifier keys; string match
/// values compare directly against identifier keys. With no match, the
/// default variant wins.
fn select_variant<'p>(
    select: &'p SelectExpression,
    scope: &mut Scope<'_, '_>,
) -> Option<&'p Pattern> {
    let selector = resolve_inline(&select.selector, scope);
    match &selector {
        Value::Number(number) => {
            for variant in &select.variants {
                if let VariantKey::NumberLiteral(key) = &variant.key {
                    if key.value == number.value {
                        return Some(&variant.value);
                    }
                }
            }
            let category =
                plural_category(scope.bundle.intl(), scope.bundle.locale(), number);
            for variant in &select.variants {
                if let VariantKey::Identifier(key) = &variant.key {
                    if key.name == category {
                        return Some(&variant.value);
                    }
                }
            }
        }
        Value::String(text) => {
            for variant in &select.variants {
                if let VariantKey::Identifier(key) = &variant.key {
                    if key.name == *text {
                        return Some(&variant.value);
                    }
                }
            }
        }
        Value::Error(_) => {}
    }
    select
        .variants
        .iter()
        .find(|variant| variant.default)
        .map(|variant| &variant.value)
}

fn find_attribute<'p>(attributes: &'p [Attribute], name: &str) -> Option<&'p Pattern> {
    attributes
        .iter()
        .find(|attribute| attribute.id.name == name)
        .map(|attribute| &attribute.value)
}

fn term_display(reference: &TermReference) -> String {
    match &reference.attribute {
        Some(attribute) => format!("-{}.{}", reference.id.name, attribute.name),
        None => format!("-{}", reference.id.name),
    }
}
