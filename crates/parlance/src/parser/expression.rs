//! Expression grammar: placeable interiors, literals, references, call
//! arguments, and select expressions.

use super::ast::{
    CallArguments, Expression, FunctionReference, InlineExpression, MessageReference,
    NamedArgument, NumberLiteral, SelectExpression, StringLiteral, TermReference, Variant,
    VariantKey, VariableReference,
};
use super::scanner::{is_digit, is_identifier_start};
use super::{ErrorKind, ParseResult, Parser, ParserError};

impl Parser<'_> {
    /// Parses `{ expression }`, cursor on the opening brace.
    ///
    /// The depth counter is restored by entry recovery when the placeable
    /// fails to parse.
    pub(crate) fn get_placeable(&mut self) -> ParseResult<Expression> {
        self.expect_byte(b'{')?;
        self.placeable_depth += 1;
        self.skip_blank();
        let expression = self.get_expression()?;
        self.skip_blank();
        self.expect_byte(b'}')?;
        self.placeable_depth -= 1;
        Ok(expression)
    }

    fn get_expression(&mut self) -> ParseResult<Expression> {
        let start = self.scanner.offset();
        let selector = self.get_inline_expression()?;
        self.skip_blank();

        if !(self.scanner.is_current(b'-') && self.scanner.peek(1) == Some(b'>')) {
            return Ok(Expression::Inline(selector));
        }

        // Only values, not patterns, may drive variant selection.
        match &selector {
            InlineExpression::MessageReference(reference) => {
                let kind = if reference.attribute.is_none() {
                    ErrorKind::MessageReferenceAsSelector
                } else {
                    ErrorKind::MessageAttributeAsSelector
                };
                return Err(ParserError::new(kind, start, self.scanner.offset()));
            }
            InlineExpression::TermReference(reference) if reference.attribute.is_none() => {
                return Err(ParserError::new(
                    ErrorKind::TermReferenceAsSelector,
                    start,
                    self.scanner.offset(),
                ));
            }
            _ => {}
        }

        self.scanner.advance(2);
        self.skip_blank_inline();
        if !self.skip_eol() {
            let at = self.scanner.offset();
            return Err(ParserError::new(
                ErrorKind::ExpectedToken("line end".to_string()),
                at,
                at + 1,
            ));
        }

        let variants = self.get_variants()?;
        Ok(Expression::Select(SelectExpression {
            selector,
            variants,
            span: self.span(start),
        }))
    }

    fn get_variants(&mut self) -> ParseResult<Vec<Variant>> {
        let list_start = self.scanner.offset();
        let mut variants: Vec<Variant> = Vec::new();
        let mut has_default = false;

        loop {
            self.skip_blank();
            let start = self.scanner.offset();
            let default = self.scanner.take_byte(b'*');
            if !self.scanner.is_current(b'[') {
                if default {
                    let at = self.scanner.offset();
                    return Err(ParserError::new(
                        ErrorKind::ExpectedToken("[".to_string()),
                        at,
                        at + 1,
                    ));
                }
                break;
            }
            if default {
                if has_default {
                    return Err(ParserError::new(
                        ErrorKind::MultipleDefaultVariants,
                        start,
                        start + 1,
                    ));
                }
                has_default = true;
            }

            self.scanner.bump();
            self.skip_blank();
            let key = self.get_variant_key()?;
            self.skip_blank();
            self.expect_byte(b']')?;

            let Some(value) = self.get_pattern()? else {
                let at = self.scanner.offset();
                return Err(ParserError::new(ErrorKind::MissingValue, at, at + 1));
            };

            variants.push(Variant {
                key,
                value,
                default,
                span: self.span(start),
            });
        }

        if variants.is_empty() {
            return Err(ParserError::new(
                ErrorKind::MissingVariants,
                list_start,
                self.scanner.offset(),
            ));
        }
        if !has_default {
            return Err(ParserError::new(
                ErrorKind::MissingDefaultVariant,
                list_start,
                self.scanner.offset(),
            ));
        }
        Ok(variants)
    }

    fn get_variant_key(&mut self) -> ParseResult<VariantKey> {
        match self.scanner.current() {
            Some(b) if is_digit(b) || b == b'-' => self.get_number().map(VariantKey::NumberLiteral),
            Some(b) if is_identifier_start(b) => self.get_identifier().map(VariantKey::Identifier),
            _ => {
                let at = self.scanner.offset();
                Err(ParserError::new(ErrorKind::MissingVariantKey, at, at + 1))
            }
        }
    }

    pub(crate) fn get_inline_expression(&mut self) -> ParseResult<InlineExpression> {
        let start = self.scanner.offset();
        match self.scanner.current() {
            Some(b'"') => self.get_string_literal().map(InlineExpression::StringLiteral),
            Some(b) if is_digit(b) => self.get_number().map(InlineExpression::NumberLiteral),
            Some(b'-') => {
                if self.scanner.peek(1).is_some_and(is_digit) {
                    return self.get_number().map(InlineExpression::NumberLiteral);
                }
                self.scanner.bump();
                let id = self.get_identifier()?;
                let attribute = self.get_attribute_accessor()?;
                let arguments = if self.scanner.is_current(b'(') {
                    Some(self.get_call_arguments()?)
                } else {
                    None
                };
                Ok(InlineExpression::TermReference(TermReference {
                    id,
                    attribute,
                    arguments,
                    span: self.span(start),
                }))
            }
            Some(b'$') => {
                self.scanner.bump();
                let id = self.get_identifier()?;
                Ok(InlineExpression::VariableReference(VariableReference {
                    id,
                    span: self.span(start),
                }))
            }
            Some(b) if is_identifier_start(b) => {
                let id = self.get_identifier()?;
                if self.scanner.is_current(b'(') {
                    if !is_callee(&id.name) {
                        return Err(ParserError::new(
                            ErrorKind::ForbiddenCallee,
                            start,
                            self.scanner.offset(),
                        ));
                    }
                    let arguments = self.get_call_arguments()?;
                    return Ok(InlineExpression::FunctionReference(FunctionReference {
                        id,
                        arguments,
                        span: self.span(start),
                    }));
                }
                let attribute = self.get_attribute_accessor()?;
                Ok(InlineExpression::MessageReference(MessageReference {
                    id,
                    attribute,
                    span: self.span(start),
                }))
            }
            Some(b'{') => Err(ParserError::new(
                ErrorKind::NestedPlaceable,
                start,
                start + 1,
            )),
            _ => Err(ParserError::new(
                ErrorKind::ExpectedInlineExpression,
                start,
                start + 1,
            )),
        }
    }

    fn get_attribute_accessor(&mut self) -> ParseResult<Option<super::ast::Identifier>> {
        if self.scanner.take_byte(b'.') {
            self.get_identifier().map(Some)
        } else {
            Ok(None)
        }
    }

    fn get_call_arguments(&mut self) -> ParseResult<CallArguments> {
        let start = self.scanner.offset();
        self.expect_byte(b'(')?;
        let mut positional: Vec<InlineExpression> = Vec::new();
        let mut named: Vec<NamedArgument> = Vec::new();

        loop {
            self.skip_blank();
            if self.scanner.take_byte(b')') {
                break;
            }
            if self.scanner.is_eof() {
                let at = self.scanner.offset();
                return Err(ParserError::new(
                    ErrorKind::ExpectedToken(")".to_string()),
                    at,
                    at + 1,
                ));
            }

            let argument_start = self.scanner.offset();
            let expression = self.get_inline_expression()?;
            self.skip_blank();

            if self.scanner.is_current(b':') {
                // Named argument: the expression before the colon must be a
                // bare identifier, and the value must be a literal.
                let name = match expression {
                    InlineExpression::MessageReference(MessageReference {
                        id,
                        attribute: None,
                        ..
                    }) => id,
                    _ => {
                        return Err(ParserError::new(
                            ErrorKind::ForbiddenArgumentName,
                            argument_start,
                            self.scanner.offset(),
                        ));
                    }
                };
                if named.iter().any(|argument| argument.name == name) {
                    return Err(ParserError::new(
                        ErrorKind::DuplicatedNamedArgument(name.name),
                        argument_start,
                        self.scanner.offset(),
                    ));
                }
                self.scanner.bump();
                self.skip_blank();
                let value_start = self.scanner.offset();
                let value = self.get_inline_expression()?;
                if !matches!(
                    value,
                    InlineExpression::StringLiteral(_) | InlineExpression::NumberLiteral(_)
                ) {
                    return Err(ParserError::new(
                        ErrorKind::MissingLiteral,
                        value_start,
                        self.scanner.offset(),
                    ));
                }
                named.push(NamedArgument {
                    name,
                    value,
                    span: self.span(argument_start),
                });
            } else {
                if !named.is_empty() {
                    return Err(ParserError::new(
                        ErrorKind::PositionalArgumentFollowsNamed,
                        argument_start,
                        self.scanner.offset(),
                    ));
                }
                positional.push(expression);
            }

            self.skip_blank();
            if self.scanner.take_byte(b',') {
                continue;
            }
            if self.scanner.take_byte(b')') {
                break;
            }
            let at = self.scanner.offset();
            return Err(ParserError::new(
                ErrorKind::ExpectedToken(")".to_string()),
                at,
                at + 1,
            ));
        }

        Ok(CallArguments {
            positional,
            named,
            span: self.span(start),
        })
    }

    fn get_string_literal(&mut self) -> ParseResult<StringLiteral> {
        let start = self.scanner.offset();
        self.scanner.bump();
        let raw_start = self.scanner.offset();
        loop {
            match self.scanner.current() {
                None | Some(b'\n') => {
                    return Err(ParserError::new(
                        ErrorKind::UnterminatedStringLiteral,
                        start,
                        self.scanner.offset(),
                    ));
                }
                Some(b'"') => {
                    let raw = self.scanner.slice(raw_start, self.scanner.offset()).to_string();
                    self.scanner.bump();
                    return Ok(StringLiteral {
                        raw,
                        span: self.span(start),
                    });
                }
                Some(b'\\') => {
                    let escape_start = self.scanner.offset();
                    self.scanner.bump();
                    match self.scanner.current() {
                        Some(b'\\' | b'"') => self.scanner.bump(),
                        Some(u @ (b'u' | b'U')) => {
                            self.scanner.bump();
                            let digits = if u == b'u' { 4 } else { 6 };
                            for _ in 0..digits {
                                match self.scanner.current() {
                                    Some(b) if b.is_ascii_hexdigit() => self.scanner.bump(),
                                    _ => {
                                        let seq = self
                                            .scanner
                                            .slice(escape_start, self.scanner.offset())
                                            .to_string();
                                        return Err(ParserError::new(
                                            ErrorKind::InvalidUnicodeEscapeSequence(seq),
                                            escape_start,
                                            self.scanner.offset(),
                                        ));
                                    }
                                }
                            }
                        }
                        Some(b) if b.is_ascii() => {
                            return Err(ParserError::new(
                                ErrorKind::InvalidEscapeSequence(format!("\\{}", b as char)),
                                escape_start,
                                self.scanner.offset() + 1,
                            ));
                        }
                        _ => {
                            return Err(ParserError::new(
                                ErrorKind::InvalidEscapeSequence("\\".to_string()),
                                escape_start,
                                self.scanner.offset(),
                            ));
                        }
                    }
                }
                Some(_) => self.scanner.bump(),
            }
        }
    }

    pub(crate) fn get_number(&mut self) -> ParseResult<NumberLiteral> {
        let start = self.scanner.offset();
        self.scanner.take_byte(b'-');
        self.expect_digits()?;
        let mut precision = 0;
        if self.scanner.is_current(b'.') && self.scanner.peek(1).is_some_and(is_digit) {
            self.scanner.bump();
            let fraction_start = self.scanner.offset();
            self.expect_digits()?;
            precision = self.scanner.offset() - fraction_start;
        }
        let raw = self.scanner.slice(start, self.scanner.offset()).to_string();
        let value = raw.parse().unwrap_or_default();
        Ok(NumberLiteral {
            raw,
            value,
            precision,
            span: self.span(start),
        })
    }

    fn expect_digits(&mut self) -> ParseResult<()> {
        let start = self.scanner.offset();
        while let Some(b) = self.scanner.current() {
            if !is_digit(b) {
                break;
            }
            self.scanner.bump();
        }
        if self.scanner.offset() == start {
            return Err(ParserError::new(
                ErrorKind::ExpectedCharRange("0-9".to_string()),
                start,
                start + 1,
            ));
        }
        Ok(())
    }
}

/// Callees are upper-case identifiers by convention: `[A-Z][A-Z0-9_-]*`.
fn is_callee(name: &str) -> bool {
    name.bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}
