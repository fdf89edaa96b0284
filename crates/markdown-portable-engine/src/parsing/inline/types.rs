use serde::{Deserialize, Serialize};

use crate::parsing::rope::Span;

use super::kinds::Flanking;

/// An inline lexical unit with a byte span into its block's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineToken {
    pub kind: InlineTokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineTokenKind {
    /// Plain text that isn't part of any special construct.
    Text,
    /// An emphasis marker (`*`, `**`, `_`, `__`).
    Delimiter(Delimiter),
    /// A code span. This is a raw zone; `inner` excludes the backticks.
    CodeSpan { inner: Span },
    /// The `[` opening link text. Always followed by a matching `LinkClose`.
    LinkOpen { href: String },
    /// The `](href)` closing link text.
    LinkClose,
    /// `![alt](src)`.
    Image { alt: String, src: String },
    /// A bare `http(s)://` URL.
    AutoLink { href: String },
    /// A backslash-escaped ASCII punctuation character.
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimKind {
    Strong,
    Emphasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub kind: DelimKind,
    pub ch: u8,
    pub flanking: Flanking,
}

impl DelimKind {
    pub fn mark(self) -> Mark {
        match self {
            DelimKind::Strong => Mark::Strong,
            DelimKind::Emphasis => Mark::Emphasis,
        }
    }
}

/// A run of text sharing one ordered set of marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: vec![],
        }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

/// An inline style or annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Emphasis,
    Code,
    Link { href: String },
}
