/// A cursor for inline lexing over a byte range of a block's text.
///
/// Positions are byte offsets into the full text, so spans produced while
/// lexing a nested range (link text) stay comparable with the outer ones.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The full block text.
    pub s: &'a str,
    /// Current byte offset.
    pub i: usize,
    /// Exclusive end of the range being lexed.
    pub end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self::with_range(s, 0, s.len())
    }

    pub fn with_range(s: &'a str, start: usize, end: usize) -> Self {
        Self { s, i: start, end }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.end
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        if self.eof() {
            return None;
        }
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining range starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().as_bytes().starts_with(pat)
    }

    /// The unconsumed part of the range.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..self.end).unwrap_or("")
    }

    /// Advances by one whole char.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes. Callers only skip ASCII markers.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.end);
    }

    /// Counts how many times `b` repeats from the current position.
    pub fn run_len(&self, b: u8) -> usize {
        self.rest().bytes().take_while(|&x| x == b).count()
    }

    /// The char immediately before byte offset `at`, looking at the full text.
    pub fn char_before(&self, at: usize) -> Option<char> {
        self.s.get(..at)?.chars().next_back()
    }

    /// The char starting at byte offset `at`, looking at the full text.
    pub fn char_at(&self, at: usize) -> Option<char> {
        self.s.get(at..)?.chars().next()
    }
}
