/// A byte range `[start, end)` into a source text.
///
/// Block tokens carry spans into the rope; inline tokens carry spans into
/// the joined text of the block they were lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Slices `s` with this span, returning `""` when out of bounds or not
    /// on a char boundary.
    pub fn slice(self, s: &str) -> &str {
        s.get(self.start..self.end).unwrap_or("")
    }
}
