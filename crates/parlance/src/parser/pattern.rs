//! Pattern grammar: literal text, placeables, and multiline blocks.
//!
//! Patterns may continue over indented lines. The minimum indentation across
//! non-blank continuation lines is stripped from every continuation line;
//! indentation beyond the minimum is kept as literal text. Blank continuation
//! lines contribute a single newline. Trailing blank content is trimmed.

use super::ast::{Pattern, PatternElement, Placeable, TextElement};
use super::{ErrorKind, ParseResult, Parser, ParserError};

/// Raw pattern pieces collected before indentation is resolved.
enum Draft {
    /// Leading spaces of a continuation line: `width` bytes at `start`.
    /// Blank-line indents do not participate in the common-indent minimum.
    Indent {
        start: usize,
        width: usize,
        blank: bool,
    },
    /// A raw source slice with no line ending.
    Text { start: usize, end: usize },
    /// A normalized line break.
    Newline,
    Placeable(Placeable),
}

impl Draft {
    /// Whether this piece contributes only blank content.
    fn is_blank(&self, source: &str) -> bool {
        match self {
            Draft::Indent { .. } | Draft::Newline => true,
            Draft::Text { start, end } => source[*start..*end].bytes().all(|b| b == b' '),
            Draft::Placeable(_) => false,
        }
    }
}

impl Parser<'_> {
    /// Parses a pattern, returning `None` when there is no value (the caller
    /// decides whether that is an error).
    pub(crate) fn get_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mut drafts: Vec<Draft> = Vec::new();

        self.skip_blank_inline();
        let start = self.scanner.offset();
        let mut at_line_start = if self.scanner.is_eof() || self.is_eol() {
            if !self.skip_eol() {
                return Ok(None);
            }
            true
        } else {
            false
        };

        loop {
            if at_line_start {
                if !self.continue_line(&mut drafts) {
                    break;
                }
                at_line_start = false;
                continue;
            }
            match self.scanner.current() {
                None => break,
                Some(b'{') => {
                    let placeable_start = self.scanner.offset();
                    let expression = self.get_placeable()?;
                    drafts.push(Draft::Placeable(Placeable {
                        expression,
                        span: self.span(placeable_start),
                    }));
                }
                Some(b'}') => {
                    // Inside a placeable the brace closes the enclosing
                    // select expression; at the top level it is an error.
                    if self.placeable_depth > 0 {
                        break;
                    }
                    let at = self.scanner.offset();
                    return Err(ParserError::new(
                        ErrorKind::UnbalancedClosingBrace,
                        at,
                        at + 1,
                    ));
                }
                Some(_) => at_line_start = self.take_text_run(&mut drafts),
            }
        }

        Ok(self.assemble(drafts, start))
    }

    /// Examines the line under the cursor (and any blank lines below it).
    /// Returns false (cursor rewound to the line start) when the pattern does
    /// not continue.
    fn continue_line(&mut self, drafts: &mut Vec<Draft>) -> bool {
        loop {
            let line_start = self.scanner.offset();
            let width = self.skip_blank_inline();
            match self.scanner.current() {
                // EOF: trailing spaces are blank content, dropped on assembly.
                None => return false,
                // Blank line: keep it only once the pattern has content;
                // leading blank lines are not part of the value.
                Some(b'\n') | Some(b'\r') if self.is_eol() => {
                    if !drafts.is_empty() {
                        drafts.push(Draft::Indent {
                            start: line_start,
                            width,
                            blank: true,
                        });
                    }
                    self.skip_eol();
                    if !drafts.is_empty() {
                        drafts.push(Draft::Newline);
                    }
                }
                // An attribute, variant, or closing brace ends the pattern.
                Some(b'.' | b'[' | b'*' | b'}') => {
                    self.scanner.seek(line_start);
                    return false;
                }
                // A non-indented line is a new entry.
                Some(_) if width == 0 => {
                    self.scanner.seek(line_start);
                    return false;
                }
                Some(_) => {
                    drafts.push(Draft::Indent {
                        start: line_start,
                        width,
                        blank: false,
                    });
                    return true;
                }
            }
        }
    }

    /// Consumes literal text up to a brace or line ending. Returns true when
    /// the run ended at a line ending (cursor past it).
    fn take_text_run(&mut self, drafts: &mut Vec<Draft>) -> bool {
        let start = self.scanner.offset();
        let mut ended_line = false;
        while let Some(b) = self.scanner.current() {
            if b == b'{' || b == b'}' {
                break;
            }
            if self.is_eol() {
                ended_line = true;
                break;
            }
            self.scanner.bump();
        }
        if self.scanner.offset() > start {
            drafts.push(Draft::Text {
                start,
                end: self.scanner.offset(),
            });
        }
        if ended_line {
            self.skip_eol();
            drafts.push(Draft::Newline);
        }
        ended_line
    }

    /// Resolves indentation, trims trailing blank content, and merges
    /// adjacent text into final elements.
    ///
    /// Merged text spans multiple dedented source lines and is no longer a
    /// contiguous source slice, so assembled text elements carry no span of
    /// their own.
    fn assemble(&self, mut drafts: Vec<Draft>, start: usize) -> Option<Pattern> {
        let source = self.scanner.source();

        let common_indent = drafts
            .iter()
            .filter_map(|draft| match draft {
                Draft::Indent {
                    width, blank: false, ..
                } => Some(*width),
                _ => None,
            })
            .min();

        let last_non_blank = drafts.iter().rposition(|draft| !draft.is_blank(source))?;
        drafts.truncate(last_non_blank + 1);

        let mut elements: Vec<PatternElement> = Vec::new();
        let mut text = String::new();
        for draft in drafts {
            match draft {
                Draft::Indent { start, width, .. } => {
                    let strip = common_indent.map_or(width, |common| common.min(width));
                    text.push_str(&source[start + strip..start + width]);
                }
                Draft::Text { start, end } => text.push_str(&source[start..end]),
                Draft::Newline => text.push('\n'),
                Draft::Placeable(placeable) => {
                    if !text.is_empty() {
                        elements.push(PatternElement::Text(TextElement {
                            value: std::mem::take(&mut text),
                            span: None,
                        }));
                    }
                    elements.push(PatternElement::Placeable(placeable));
                }
            }
        }
        // Trailing spaces on the final line are not part of the value.
        let trimmed = text.trim_end_matches(' ');
        if !trimmed.is_empty() {
            elements.push(PatternElement::Text(TextElement {
                value: trimmed.to_string(),
                span: None,
            }));
        }

        Some(Pattern {
            elements,
            span: self.span(start),
        })
    }
}
