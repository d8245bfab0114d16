//! Syntax tree for localization resources.
//!
//! These types are public to enable external tooling (linters, formatters,
//! dump utilities). Node variants form closed sets so that adding a variant
//! forces every traversal site to be updated at compile time.
//!
//! Every node carries an optional [`Span`], populated only when the source is
//! parsed with span tracking. Spans are excluded from equality so that two
//! parses of equivalent text compare equal regardless of layout, and they are
//! omitted from serde output when absent.

use std::borrow::Cow;

use serde::Serialize;

/// Byte/line/column location of a single point in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Half-open source range covered by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

/// Implements span-insensitive structural equality for a node struct.
macro_rules! span_insensitive_eq {
    ($name:ident: $($field:ident),+) => {
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&+
            }
        }
    };
}

/// A parsed resource: the ordered list of entries found in one source text.
///
/// Order is insertion order from source. It is irrelevant to resolution but
/// preserved for serialization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resource {
    pub body: Vec<Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Resource: body);

/// A top-level entry of a [`Resource`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Entry {
    Message(Message),
    Term(Term),
    Comment(Comment),
    GroupComment(Comment),
    ResourceComment(Comment),
    Junk(Junk),
}

/// A user-facing message: an identifier with a value pattern and/or
/// attributes.
///
/// If `value` is absent, `attributes` is non-empty; the parser rejects
/// messages with neither.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: Identifier,
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
    pub comment: Option<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Message: id, value, attributes, comment);

/// A term: a reusable pattern referenced as `-id`, never user-facing on its
/// own. Unlike messages, the value pattern is mandatory.
///
/// The identifier is stored without the leading `-` marker.
#[derive(Debug, Clone, Serialize)]
pub struct Term {
    pub id: Identifier,
    pub value: Pattern,
    pub attributes: Vec<Attribute>,
    pub comment: Option<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Term: id, value, attributes, comment);

/// A named sub-pattern of a message or term.
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub id: Identifier,
    pub value: Pattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Attribute: id, value);

/// A case-sensitive identifier: `[a-zA-Z][a-zA-Z0-9_-]*`.
#[derive(Debug, Clone, Serialize)]
pub struct Identifier {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Identifier: name);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier {
            name: name.into(),
            span: None,
        }
    }
}

/// Comment content with `#` markers and the single following space stripped;
/// consecutive lines of the same level are newline-joined.
///
/// The comment level (`#`, `##`, `###`) is carried by the [`Entry`] variant,
/// except for comments attached to a message or term, which are always
/// level one.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Comment: content);

/// An unparseable entry: the raw source slice plus the diagnostics explaining
/// why parsing failed. Junk is inert during resolution; it exists so tooling
/// can report it.
#[derive(Debug, Clone, Serialize)]
pub struct Junk {
    pub content: String,
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Junk: content, annotations);

/// A single diagnostic attached to a [`Junk`] entry.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    /// Stable diagnostic code, e.g. `E0010`.
    pub code: String,
    /// Positional arguments interpolated into `message`.
    pub arguments: Vec<String>,
    /// Rendered human-readable message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Annotation: code, arguments, message);

/// The displayable content of a message, term, attribute, or variant.
#[derive(Debug, Clone, Serialize)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Pattern: elements);

/// One element of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PatternElement {
    Text(TextElement),
    Placeable(Placeable),
}

/// Literal text contributing verbatim to the output.
#[derive(Debug, Clone, Serialize)]
pub struct TextElement {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(TextElement: value);

/// A single evaluated expression embedded in a pattern via `{ }`.
///
/// Placeables never contain another placeable; only single-level expression
/// evaluation is possible.
#[derive(Debug, Clone, Serialize)]
pub struct Placeable {
    pub expression: Expression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Placeable: expression);

/// The interior of a placeable.
///
/// Serializes transparently: the inline expression (or select expression)
/// appears directly, carrying its own type tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    Inline(InlineExpression),
    Select(SelectExpression),
}

/// The closed set of inline expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum InlineExpression {
    StringLiteral(StringLiteral),
    NumberLiteral(NumberLiteral),
    VariableReference(VariableReference),
    MessageReference(MessageReference),
    TermReference(TermReference),
    FunctionReference(FunctionReference),
}

/// A quoted string literal, stored in raw (still escaped) form.
#[derive(Debug, Clone, Serialize)]
pub struct StringLiteral {
    /// Source text between the quotes, escapes intact.
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(StringLiteral: raw);

impl StringLiteral {
    /// Unescapes the raw text on demand.
    ///
    /// Recognizes `\\`, `\"`, `\uHHHH` and `\UHHHHHH`. A decoded code point
    /// in the surrogate range (or otherwise invalid) is replaced with U+FFFD.
    /// The parser validates escapes up front, so this method never fails.
    pub fn value(&self) -> Cow<'_, str> {
        if !self.raw.contains('\\') {
            return Cow::Borrowed(&self.raw);
        }
        let mut out = String::with_capacity(self.raw.len());
        let mut chars = self.raw.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(u @ ('u' | 'U')) => {
                    let len = if u == 'u' { 4 } else { 6 };
                    let digits: String = chars.by_ref().take(len).collect();
                    let decoded = u32::from_str_radix(&digits, 16)
                        .ok()
                        .and_then(char::from_u32)
                        .unwrap_or('\u{FFFD}');
                    out.push(decoded);
                }
                _ => out.push('\u{FFFD}'),
            }
        }
        Cow::Owned(out)
    }
}

/// A number literal retaining its original token, decimal value, and the
/// number of fraction digits it declared.
#[derive(Debug, Clone, Serialize)]
pub struct NumberLiteral {
    /// The literal exactly as written in the source.
    pub raw: String,
    /// Parsed decimal value.
    pub value: f64,
    /// Declared fraction digits, e.g. `1.50` has precision 2.
    pub precision: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(NumberLiteral: raw, value, precision);

/// A runtime variable: `$name`.
#[derive(Debug, Clone, Serialize)]
pub struct VariableReference {
    pub id: Identifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(VariableReference: id);

/// A reference to another message or one of its attributes: `id` or
/// `id.attr`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(MessageReference: id, attribute);

/// A reference to a term or one of its attributes, optionally parameterized:
/// `-id`, `-id.attr`, `-id(name: "value")`.
#[derive(Debug, Clone, Serialize)]
pub struct TermReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
    pub arguments: Option<CallArguments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(TermReference: id, attribute, arguments);

/// A call to a registered function: `NAME(pos, opt: "value")`.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionReference {
    pub id: Identifier,
    pub arguments: CallArguments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(FunctionReference: id, arguments);

/// A branch construct selecting among variants by a selector value.
#[derive(Debug, Clone, Serialize)]
pub struct SelectExpression {
    pub selector: InlineExpression,
    pub variants: Vec<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(SelectExpression: selector, variants);

/// One labeled branch of a select expression. Exactly one variant in a
/// select expression carries `default: true`.
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    pub default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(Variant: key, value, default);

/// The key of a [`Variant`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum VariantKey {
    Identifier(Identifier),
    NumberLiteral(NumberLiteral),
}

/// Arguments of a term reference or function call: ordered positional
/// expressions plus uniquely named options whose values are literals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CallArguments {
    pub positional: Vec<InlineExpression>,
    pub named: Vec<NamedArgument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(CallArguments: positional, named);

/// A named argument in a call; the value is restricted to string and number
/// literals by the parser.
#[derive(Debug, Clone, Serialize)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: InlineExpression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

span_insensitive_eq!(NamedArgument: name, value);
