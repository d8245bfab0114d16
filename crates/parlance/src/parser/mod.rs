//! Recursive-descent parser for localization resources.
//!
//! The parser never fails: malformed entries degrade to [`ast::Junk`] nodes
//! carrying diagnostics, and parsing continues with the next entry. Entries
//! are classified by their first significant character (`#` comment family,
//! `-` term, identifier start for messages); on a grammar violation the
//! parser discards input up to the next blank line or valid entry start.

pub mod ast;
mod errors;
mod expression;
mod pattern;
mod scanner;

pub use errors::{ErrorKind, ParserError};

use ast::{
    Annotation, Attribute, Comment, Entry, Identifier, Junk, Location, Message, Resource, Span,
    Term,
};
use scanner::{Scanner, is_identifier_byte, is_identifier_start};

/// Parse source text into a [`Resource`] without span tracking.
///
/// Never fails; malformed entries appear as [`ast::Junk`] in the body.
///
/// # Example
///
/// ```
/// use parlance::parser::{ast, parse};
///
/// let resource = parse("hello = Hello, world!");
/// assert_eq!(resource.body.len(), 1);
/// assert!(matches!(resource.body[0], ast::Entry::Message(_)));
/// ```
pub fn parse(source: &str) -> Resource {
    Parser::new(source, false).run()
}

/// Parse source text, attaching a [`Span`] to every node.
///
/// Spans are excluded from node equality, so resources parsed with and
/// without spans compare equal.
pub fn parse_with_spans(source: &str) -> Resource {
    Parser::new(source, true).run()
}

type ParseResult<T> = Result<T, ParserError>;

pub(crate) struct Parser<'s> {
    scanner: Scanner<'s>,
    spans: bool,
    /// Byte offsets of line starts; only populated when `spans` is on.
    line_starts: Vec<usize>,
    /// How many placeables enclose the cursor. A closing brace terminates the
    /// current pattern inside a placeable and is an error outside one.
    placeable_depth: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str, spans: bool) -> Self {
        let line_starts = if spans {
            let mut starts = vec![0];
            starts.extend(
                source
                    .bytes()
                    .enumerate()
                    .filter_map(|(i, b)| (b == b'\n').then_some(i + 1)),
            );
            starts
        } else {
            Vec::new()
        };
        Parser {
            scanner: Scanner::new(source),
            spans,
            line_starts,
            placeable_depth: 0,
        }
    }

    fn run(mut self) -> Resource {
        let mut body = Vec::new();
        // A level-one comment is held back until we know whether the entry
        // directly below it should adopt it as its leading comment.
        let mut held: Option<(Comment, usize)> = None;

        self.skip_blank_block();
        while !self.scanner.is_eof() {
            let entry_start = self.scanner.offset();
            match self.get_entry() {
                Ok(Entry::Comment(comment)) => {
                    if let Some((prev, _)) = held.take() {
                        body.push(Entry::Comment(prev));
                    }
                    held = Some((comment, self.scanner.offset()));
                }
                Ok(entry) => {
                    let entry = match (entry, held.take()) {
                        (Entry::Message(mut message), Some((comment, end))) => {
                            if end == entry_start {
                                message.comment = Some(comment);
                            } else {
                                body.push(Entry::Comment(comment));
                            }
                            Entry::Message(message)
                        }
                        (Entry::Term(mut term), Some((comment, end))) => {
                            if end == entry_start {
                                term.comment = Some(comment);
                            } else {
                                body.push(Entry::Comment(comment));
                            }
                            Entry::Term(term)
                        }
                        (entry, Some((comment, _))) => {
                            body.push(Entry::Comment(comment));
                            entry
                        }
                        (entry, None) => entry,
                    };
                    body.push(entry);
                }
                Err(error) => {
                    if let Some((comment, _)) = held.take() {
                        body.push(Entry::Comment(comment));
                    }
                    self.placeable_depth = 0;
                    let end = self.recover();
                    body.push(Entry::Junk(Junk {
                        content: self.scanner.slice(entry_start, end).to_string(),
                        annotations: vec![self.annotation(&error)],
                        span: self.span(entry_start),
                    }));
                }
            }
            self.skip_blank_block();
        }
        if let Some((comment, _)) = held.take() {
            body.push(Entry::Comment(comment));
        }

        let span = self.spans.then(|| Span {
            start: self.location(0),
            end: self.location(self.scanner.source().len()),
        });
        Resource { body, span }
    }

    fn get_entry(&mut self) -> ParseResult<Entry> {
        match self.scanner.current() {
            Some(b'#') => self.get_comment_entry(),
            Some(b'-') => self.get_term().map(Entry::Term),
            Some(b) if is_identifier_start(b) => self.get_message().map(Entry::Message),
            _ => {
                let at = self.scanner.offset();
                Err(ParserError::new(ErrorKind::ExpectedEntry, at, at + 1))
            }
        }
    }

    // === Comments ===

    /// Parses one comment entry; consecutive lines of the same level merge
    /// into a single newline-joined content string.
    fn get_comment_entry(&mut self) -> ParseResult<Entry> {
        let start = self.scanner.offset();
        let mut level = 0;
        while level < 3 && self.scanner.take_byte(b'#') {
            level += 1;
        }

        let mut content = String::new();
        let mut first = true;
        loop {
            if !first {
                content.push('\n');
            }
            first = false;
            content.push_str(self.get_comment_line()?);
            if !self.skip_eol() {
                break;
            }
            if self.peek_comment_marker(level) {
                self.scanner.advance(level);
            } else {
                break;
            }
        }

        let comment = Comment {
            content,
            span: self.span(start),
        };
        Ok(match level {
            1 => Entry::Comment(comment),
            2 => Entry::GroupComment(comment),
            _ => Entry::ResourceComment(comment),
        })
    }

    /// Reads the content of one comment line, cursor positioned right after
    /// the `#` markers. The markers must be followed by a space or a line end.
    fn get_comment_line(&mut self) -> ParseResult<&'s str> {
        if self.scanner.is_eof() || self.is_eol() {
            return Ok("");
        }
        self.expect_byte(b' ')?;
        let start = self.scanner.offset();
        while !self.scanner.is_eof() && !self.is_eol() {
            self.scanner.bump();
        }
        Ok(self.scanner.slice(start, self.scanner.offset()))
    }

    /// True if the cursor sits on a comment line of exactly `level` markers.
    fn peek_comment_marker(&self, level: usize) -> bool {
        for i in 0..level {
            if self.scanner.peek(i) != Some(b'#') {
                return false;
            }
        }
        matches!(self.scanner.peek(level), None | Some(b' ' | b'\n' | b'\r'))
    }

    // === Messages and terms ===

    fn get_message(&mut self) -> ParseResult<Message> {
        let start = self.scanner.offset();
        let id = self.get_identifier()?;
        self.skip_blank_inline();
        self.expect_byte(b'=')?;

        let value = self.get_pattern()?;
        let attributes = self.get_attributes()?;

        if value.is_none() && attributes.is_empty() {
            return Err(ParserError::new(
                ErrorKind::ExpectedMessageField(id.name),
                start,
                self.scanner.offset(),
            ));
        }

        Ok(Message {
            id,
            value,
            attributes,
            comment: None,
            span: self.span(start),
        })
    }

    fn get_term(&mut self) -> ParseResult<Term> {
        let start = self.scanner.offset();
        self.expect_byte(b'-')?;
        let id = self.get_identifier()?;
        self.skip_blank_inline();
        self.expect_byte(b'=')?;

        let Some(value) = self.get_pattern()? else {
            return Err(ParserError::new(
                ErrorKind::ExpectedTermField(id.name),
                start,
                self.scanner.offset(),
            ));
        };
        let attributes = self.get_attributes()?;

        Ok(Term {
            id,
            value,
            attributes,
            comment: None,
            span: self.span(start),
        })
    }

    fn get_attributes(&mut self) -> ParseResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        loop {
            let checkpoint = self.scanner.offset();
            self.skip_blank();
            if !self.scanner.is_current(b'.') {
                self.scanner.seek(checkpoint);
                break;
            }
            let start = self.scanner.offset();
            self.scanner.bump();
            let id = self.get_identifier()?;
            self.skip_blank_inline();
            self.expect_byte(b'=')?;
            let Some(value) = self.get_pattern()? else {
                let at = self.scanner.offset();
                return Err(ParserError::new(ErrorKind::MissingValue, at, at + 1));
            };
            attributes.push(Attribute {
                id,
                value,
                span: self.span(start),
            });
        }
        Ok(attributes)
    }

    pub(crate) fn get_identifier(&mut self) -> ParseResult<Identifier> {
        let start = self.scanner.offset();
        match self.scanner.current() {
            Some(b) if is_identifier_start(b) => self.scanner.bump(),
            _ => {
                return Err(ParserError::new(
                    ErrorKind::ExpectedCharRange("a-zA-Z".to_string()),
                    start,
                    start + 1,
                ));
            }
        }
        while let Some(b) = self.scanner.current() {
            if !is_identifier_byte(b) {
                break;
            }
            self.scanner.bump();
        }
        Ok(Identifier {
            name: self.scanner.slice(start, self.scanner.offset()).to_string(),
            span: self.span(start),
        })
    }

    // === Error recovery ===

    /// Skips to the next blank line or the next valid entry start, returning
    /// the end offset of the junk slice.
    fn recover(&mut self) -> usize {
        while !self.scanner.is_eof() {
            // Consume the rest of the current line.
            while let Some(b) = self.scanner.current() {
                self.scanner.bump();
                if b == b'\n' {
                    break;
                }
            }
            let line_start = self.scanner.offset();
            let indent = self.skip_blank_inline();
            match self.scanner.current() {
                None => break,
                Some(b'\n' | b'\r') => {
                    self.scanner.seek(line_start);
                    break;
                }
                Some(b'#' | b'-') if indent == 0 => {
                    self.scanner.seek(line_start);
                    break;
                }
                Some(b) if indent == 0 && is_identifier_start(b) => {
                    self.scanner.seek(line_start);
                    break;
                }
                Some(_) => {}
            }
        }
        self.scanner.offset()
    }

    fn annotation(&self, error: &ParserError) -> Annotation {
        Annotation {
            code: error.code().to_string(),
            arguments: error.kind.arguments(),
            message: error.kind.to_string(),
            span: self.spans.then(|| Span {
                start: self.location(error.start),
                end: self.location(error.end),
            }),
        }
    }

    // === Blank handling ===

    /// Skips spaces on the current line, returning the number skipped.
    pub(crate) fn skip_blank_inline(&mut self) -> usize {
        let start = self.scanner.offset();
        while self.scanner.take_byte(b' ') {}
        self.scanner.offset() - start
    }

    /// Consumes one line ending (`\n` or `\r\n`) if present.
    pub(crate) fn skip_eol(&mut self) -> bool {
        if self.scanner.take_byte(b'\n') {
            return true;
        }
        if self.scanner.is_current(b'\r') && self.scanner.peek(1) == Some(b'\n') {
            self.scanner.advance(2);
            return true;
        }
        false
    }

    /// True if the cursor sits on a line ending.
    pub(crate) fn is_eol(&self) -> bool {
        self.scanner.is_current(b'\n')
            || (self.scanner.is_current(b'\r') && self.scanner.peek(1) == Some(b'\n'))
    }

    /// Skips spaces and line endings.
    pub(crate) fn skip_blank(&mut self) {
        loop {
            if self.scanner.take_byte(b' ') {
                continue;
            }
            if !self.skip_eol() {
                break;
            }
        }
    }

    /// Skips whole blank lines, leaving the cursor at the first line with
    /// non-blank content.
    pub(crate) fn skip_blank_block(&mut self) {
        loop {
            let checkpoint = self.scanner.offset();
            self.skip_blank_inline();
            if !self.skip_eol() {
                self.scanner.seek(checkpoint);
                break;
            }
        }
    }

    // === Shared low-level helpers ===

    pub(crate) fn expect_byte(&mut self, b: u8) -> ParseResult<()> {
        if self.scanner.take_byte(b) {
            Ok(())
        } else {
            let at = self.scanner.offset();
            Err(ParserError::new(
                ErrorKind::ExpectedToken((b as char).to_string()),
                at,
                at + 1,
            ))
        }
    }

    pub(crate) fn span(&self, start: usize) -> Option<Span> {
        self.spans.then(|| Span {
            start: self.location(start),
            end: self.location(self.scanner.offset()),
        })
    }

    fn location(&self, offset: usize) -> Location {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        Location {
            offset,
            line: line + 1,
            column: offset - self.line_starts[line] + 1,
        }
    }
}
