use crate::parsing::rope::Span;

use super::kinds::{FenceSig, ListKind, UnsupportedConstruct};

/// A block-level lexical unit: one per source line, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte span of the whole line in the source.
    pub span: Span,
    /// Nesting level: indent width for list items, depth for quotes,
    /// heading level for headings, 0 otherwise.
    pub level: usize,
    /// 1-based source line.
    pub line: usize,
    /// Line content with the block marker removed. Code lines are verbatim.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Blank,
    Heading {
        level: u8,
    },
    ListItem {
        kind: ListKind,
    },
    FenceOpen {
        fence: FenceSig,
        language: Option<String>,
    },
    CodeLine,
    FenceClose,
    Quote {
        depth: u8,
    },
    /// Paragraph text. `degraded` is set when the line looked like block
    /// syntax we do not convert.
    Text {
        degraded: Option<UnsupportedConstruct>,
    },
}

impl Token {
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TokenKind::Blank)
    }
}
