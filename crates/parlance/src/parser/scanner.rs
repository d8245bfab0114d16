//! Byte cursor over source text.
//!
//! The scanner owns nothing but the cursor state; all buffering and
//! backtracking decisions belong to the parser. Entry delimiters and every
//! character class of the grammar are ASCII, so the cursor works on bytes and
//! multi-byte UTF-8 sequences pass through text slices untouched.

pub(crate) struct Scanner<'s> {
    source: &'s str,
    offset: usize,
}

impl<'s> Scanner<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Scanner { source, offset: 0 }
    }

    pub(crate) fn source(&self) -> &'s str {
        self.source
    }

    /// Current byte offset.
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Rewinds or fast-forwards to an absolute offset (parser backtracking).
    pub(crate) fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The byte at the cursor, if any.
    pub(crate) fn current(&self) -> Option<u8> {
        self.source.as_bytes().get(self.offset).copied()
    }

    /// The byte `ahead` positions past the cursor.
    pub(crate) fn peek(&self, ahead: usize) -> Option<u8> {
        self.source.as_bytes().get(self.offset + ahead).copied()
    }

    pub(crate) fn is_current(&self, b: u8) -> bool {
        self.current() == Some(b)
    }

    /// Advances the cursor one byte.
    pub(crate) fn bump(&mut self) {
        self.offset += 1;
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.offset += n;
    }

    /// Consumes `b` if it is the current byte.
    pub(crate) fn take_byte(&mut self, b: u8) -> bool {
        if self.is_current(b) {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'s str {
        &self.source[start..end]
    }
}

// Character classes of the grammar. All ASCII.

pub(crate) fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

pub(crate) fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

pub(crate) fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}
