pub mod lines;
pub mod slice;
pub mod span;

use xi_rope::Rope;

pub use lines::{LineRef, lines_with_spans};
pub use slice::{preview, slice_to_string};
pub use span::Span;

/// Immutable raw Markdown input. The only thing the pipeline reads.
#[derive(Debug, Clone)]
pub struct SourceText {
    rope: Rope,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    /// Lines in document order, newlines stripped from the text.
    pub fn lines(&self) -> impl Iterator<Item = LineRef> + '_ {
        lines_with_spans(&self.rope)
    }

    pub fn slice(&self, span: Span) -> String {
        slice_to_string(&self.rope, span)
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// True when the text contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.lines().all(|l| l.text.trim().is_empty())
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
