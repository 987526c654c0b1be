//! Byte-position cursor over source text with line tracking.

/// Forward-only cursor the matchers inspect and advance.
///
/// Positions are byte offsets into the source; `line` is 1-based and is
/// bumped automatically for every newline the cursor advances over.
#[derive(Debug, Clone, Copy)]
pub struct SourceCursor<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
}

impl<'a> SourceCursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    /// Unconsumed tail of the source.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.pos < self.src.len()
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Next character, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character starting at `byte_offset` past the cursor, if any.
    #[inline]
    pub fn char_at(&self, byte_offset: usize) -> Option<char> {
        self.rest().get(byte_offset..).and_then(|s| s.chars().next())
    }

    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume `n` bytes. `n` must land on a character boundary.
    pub fn advance(&mut self, n: usize) {
        let consumed = &self.src[self.pos..self.pos + n];
        self.line += consumed.bytes().filter(|&b| b == b'\n').count() as u32;
        self.pos += n;
    }
}
