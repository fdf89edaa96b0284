use crate::parsing::inline::InlineSpan;

use super::kinds::ListKind;

/// A node of the block tree.
///
/// Closed set: consumers match exhaustively. Inline content only lives in
/// leaf variants, never beside block-level siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Heading { level: u8, spans: Vec<InlineSpan> },
    Paragraph { spans: Vec<InlineSpan> },
    Quote { spans: Vec<InlineSpan> },
    List(ListBlock),
    Code { language: Option<String>, text: String },
    /// A paragraph made of a single image.
    Image { src: String, alt: String },
}

/// A list and its items. Every item belongs to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlock {
    pub kind: ListKind,
    /// 1 for a top-level list.
    pub depth: usize,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub spans: Vec<InlineSpan>,
    pub sublists: Vec<ListBlock>,
}
