//! Parse diagnostics.
//!
//! Every grammar violation maps to a stable diagnostic code. The parser never
//! surfaces these as failures; they are rendered into [`Annotation`]s on the
//! [`Junk`] entry produced by error recovery.
//!
//! [`Annotation`]: super::ast::Annotation
//! [`Junk`]: super::ast::Junk

use thiserror::Error;

/// A grammar violation detected while parsing one entry.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ParserError {
    /// Byte range the diagnostic points at.
    pub start: usize,
    pub end: usize,
    pub kind: ErrorKind,
}

impl ParserError {
    pub(crate) fn new(kind: ErrorKind, start: usize, end: usize) -> Self {
        ParserError { start, end, kind }
    }

    /// Stable diagnostic code, e.g. `E0010`.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// The closed catalog of diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// E0002: the entry does not begin with a valid start token.
    #[error("Expected an entry start")]
    ExpectedEntry,
    /// E0003: an expected literal token is missing.
    #[error("Expected token: \"{0}\"")]
    ExpectedToken(String),
    /// E0004: the current character is outside an expected range.
    #[error("Expected a character from range: \"{0}\"")]
    ExpectedCharRange(String),
    /// E0005: a message has neither value nor attributes.
    #[error("Expected message \"{0}\" to have a value or attributes")]
    ExpectedMessageField(String),
    /// E0006: a term has no value.
    #[error("Expected term \"-{0}\" to have a value")]
    ExpectedTermField(String),
    /// E0008: a call callee is not an upper-case identifier.
    #[error("The callee has to be an upper-case identifier")]
    ForbiddenCallee,
    /// E0009: a named-argument name is not a simple identifier.
    #[error("The argument name has to be a simple identifier")]
    ForbiddenArgumentName,
    /// E0010: no variant is marked as default.
    #[error("Expected one of the variants to be marked as default (*)")]
    MissingDefaultVariant,
    /// E0011: a select expression has no variants.
    #[error("Expected at least one variant after \"->\"")]
    MissingVariants,
    /// E0012: a value pattern is required but missing.
    #[error("Expected value")]
    MissingValue,
    /// E0013: a variant key is required but missing.
    #[error("Expected variant key")]
    MissingVariantKey,
    /// E0014: a literal is required but missing.
    #[error("Expected literal")]
    MissingLiteral,
    /// E0015: more than one variant is marked as default.
    #[error("Only one variant can be marked as default (*)")]
    MultipleDefaultVariants,
    /// E0016: a message reference is used as a selector.
    #[error("Message references cannot be used as selectors")]
    MessageReferenceAsSelector,
    /// E0017: a term is used as a selector.
    #[error("Terms cannot be used as selectors")]
    TermReferenceAsSelector,
    /// E0018: a message attribute is used as a selector.
    #[error("Attributes of messages cannot be used as selectors")]
    MessageAttributeAsSelector,
    /// E0020: a string literal is not terminated before end of line.
    #[error("Unterminated string literal")]
    UnterminatedStringLiteral,
    /// E0021: a positional argument follows a named one.
    #[error("Positional arguments must not follow named arguments")]
    PositionalArgumentFollowsNamed,
    /// E0022: a named argument name appears twice.
    #[error("Named arguments must be unique: \"{0}\"")]
    DuplicatedNamedArgument(String),
    /// E0025: an escape sequence is not recognized.
    #[error("Unknown escape sequence: {0}")]
    InvalidEscapeSequence(String),
    /// E0026: a Unicode escape sequence has too few hex digits.
    #[error("Invalid Unicode escape sequence: {0}")]
    InvalidUnicodeEscapeSequence(String),
    /// E0027: a closing brace has no matching opening brace.
    #[error("Unbalanced closing brace")]
    UnbalancedClosingBrace,
    /// E0028: a placeable does not contain a valid expression.
    #[error("Expected an inline expression")]
    ExpectedInlineExpression,
    /// E0029: a placeable occurs inside another placeable.
    #[error("Placeables cannot contain other placeables")]
    NestedPlaceable,
}

impl ErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ExpectedEntry => "E0002",
            ErrorKind::ExpectedToken(_) => "E0003",
            ErrorKind::ExpectedCharRange(_) => "E0004",
            ErrorKind::ExpectedMessageField(_) => "E0005",
            ErrorKind::ExpectedTermField(_) => "E0006",
            ErrorKind::ForbiddenCallee => "E0008",
            ErrorKind::ForbiddenArgumentName => "E0009",
            ErrorKind::MissingDefaultVariant => "E0010",
            ErrorKind::MissingVariants => "E0011",
            ErrorKind::MissingValue => "E0012",
            ErrorKind::MissingVariantKey => "E0013",
            ErrorKind::MissingLiteral => "E0014",
            ErrorKind::MultipleDefaultVariants => "E0015",
            ErrorKind::MessageReferenceAsSelector => "E0016",
            ErrorKind::TermReferenceAsSelector => "E0017",
            ErrorKind::MessageAttributeAsSelector => "E0018",
            ErrorKind::UnterminatedStringLiteral => "E0020",
            ErrorKind::PositionalArgumentFollowsNamed => "E0021",
            ErrorKind::DuplicatedNamedArgument(_) => "E0022",
            ErrorKind::InvalidEscapeSequence(_) => "E0025",
            ErrorKind::InvalidUnicodeEscapeSequence(_) => "E0026",
            ErrorKind::UnbalancedClosingBrace => "E0027",
            ErrorKind::ExpectedInlineExpression => "E0028",
            ErrorKind::NestedPlaceable => "E0029",
        }
    }

    /// Positional arguments interpolated into the rendered message.
    pub fn arguments(&self) -> Vec<String> {
        match self {
            ErrorKind::ExpectedToken(token) => vec![token.clone()],
            ErrorKind::ExpectedCharRange(range) => vec![range.clone()],
            ErrorKind::ExpectedMessageField(id) | ErrorKind::ExpectedTermField(id) => {
                vec![id.clone()]
            }
            ErrorKind::DuplicatedNamedArgument(name) => vec![name.clone()],
            ErrorKind::InvalidEscapeSequence(seq)
            | ErrorKind::InvalidUnicodeEscapeSequence(seq) => vec![seq.clone()],
            _ => Vec::new(),
        }
    }
}
