use log::debug;

use crate::parsing::{
    inline::{parse_inline, standalone_image},
    rope::preview,
    warnings::ParseDegraded,
};

use super::{
    kinds::ListKind,
    token::{Token, TokenKind},
    types::{BlockNode, ListBlock, ListItem},
};

/// Block tree plus the soft warnings raised while building it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    pub blocks: Vec<BlockNode>,
    pub warnings: Vec<ParseDegraded>,
}

/// Assembles block tokens into a block tree.
pub fn build(tokens: &[Token]) -> BuildOutput {
    let mut builder = BlockBuilder::new();
    for t in tokens {
        builder.push(t);
    }
    builder.finish()
}

#[derive(Debug)]
enum LeafState {
    None,
    Paragraph {
        lines: Vec<String>,
    },
    Quote {
        lines: Vec<String>,
    },
    Fence {
        language: Option<String>,
        lines: Vec<String>,
        open_line: usize,
    },
}

/// An open list on the nesting stack, keyed by its items' indent width.
#[derive(Debug)]
struct ListFrame {
    indent: usize,
    kind: ListKind,
    depth: usize,
    items: Vec<ItemDraft>,
}

/// Item text stays raw until the list closes, so lazy continuation lines
/// can still be appended.
#[derive(Debug)]
struct ItemDraft {
    text: String,
    sublists: Vec<ListBlock>,
}

impl ListFrame {
    fn new(indent: usize, kind: ListKind, depth: usize) -> Self {
        Self {
            indent,
            kind,
            depth,
            items: vec![],
        }
    }

    fn into_block(self) -> ListBlock {
        ListBlock {
            kind: self.kind,
            depth: self.depth,
            items: self
                .items
                .into_iter()
                .map(|d| ListItem {
                    spans: parse_inline(&d.text),
                    sublists: d.sublists,
                })
                .collect(),
        }
    }
}

pub struct BlockBuilder {
    leaf: LeafState,
    lists: Vec<ListFrame>,
    after_blank: bool,
    out: Vec<BlockNode>,
    warnings: Vec<ParseDegraded>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            leaf: LeafState::None,
            lists: vec![],
            after_blank: false,
            out: vec![],
            warnings: vec![],
        }
    }

    pub fn push(&mut self, t: &Token) {
        if let LeafState::Fence { lines, .. } = &mut self.leaf {
            match t.kind {
                TokenKind::CodeLine => {
                    lines.push(t.text.clone());
                    return;
                }
                TokenKind::FenceClose => {
                    self.flush_leaf();
                    return;
                }
                // Only reachable with hand-built token streams.
                _ => self.flush_unterminated_fence(),
            }
        }

        match &t.kind {
            TokenKind::Blank => {
                self.flush_leaf();
                self.after_blank = true;
                return;
            }
            TokenKind::Heading { level } => {
                self.close_all();
                let spans = parse_inline(&t.text);
                if !spans.is_empty() {
                    self.out.push(BlockNode::Heading {
                        level: *level,
                        spans,
                    });
                }
            }
            TokenKind::FenceOpen { language, .. } => {
                self.close_all();
                self.leaf = LeafState::Fence {
                    language: language.clone(),
                    lines: vec![],
                    open_line: t.line,
                };
            }
            TokenKind::Quote { .. } => {
                if !matches!(self.leaf, LeafState::Quote { .. }) {
                    self.close_all();
                }
                if t.text.is_empty() {
                    self.flush_leaf();
                } else {
                    self.append_quote(&t.text);
                }
            }
            TokenKind::ListItem { kind } => {
                self.flush_leaf();
                self.push_item(t.level, *kind, &t.text);
            }
            TokenKind::Text { degraded } => {
                if let Some(construct) = degraded {
                    self.warnings.push(ParseDegraded::UnsupportedSyntax {
                        line: t.line,
                        construct: construct.name(),
                        text: preview(&t.text, 40),
                    });
                }
                self.push_text(&t.text);
            }
            TokenKind::CodeLine => self.push_text(&t.text),
            TokenKind::FenceClose => {}
        }
        self.after_blank = false;
    }

    pub fn finish(mut self) -> BuildOutput {
        // EOF flush
        if matches!(self.leaf, LeafState::Fence { .. }) {
            self.flush_unterminated_fence();
        }
        self.close_all();
        BuildOutput {
            blocks: self.out,
            warnings: self.warnings,
        }
    }

    fn push_text(&mut self, text: &str) {
        match &mut self.leaf {
            LeafState::Paragraph { lines } => lines.push(text.to_string()),
            LeafState::Quote { lines } if !self.after_blank => lines.push(text.to_string()),
            LeafState::None if !self.after_blank && !self.lists.is_empty() => {
                if let Some(item) = self.lists.last_mut().and_then(|f| f.items.last_mut()) {
                    item.text.push('\n');
                    item.text.push_str(text);
                }
            }
            _ => {
                self.close_all();
                self.leaf = LeafState::Paragraph {
                    lines: vec![text.to_string()],
                };
            }
        }
    }

    fn append_quote(&mut self, text: &str) {
        match &mut self.leaf {
            LeafState::Quote { lines } => lines.push(text.to_string()),
            _ => {
                self.flush_leaf();
                self.leaf = LeafState::Quote {
                    lines: vec![text.to_string()],
                };
            }
        }
    }

    /// Resolves nesting by indent width: deeper indent opens a sublist,
    /// shallower indent pops levels, and an indent below the root list
    /// closes every open list.
    fn push_item(&mut self, indent: usize, kind: ListKind, text: &str) {
        loop {
            let Some(top) = self.lists.last() else {
                self.lists.push(ListFrame::new(indent, kind, 1));
                break;
            };
            if indent > top.indent {
                let depth = top.depth + 1;
                self.lists.push(ListFrame::new(indent, kind, depth));
                break;
            }
            if indent == top.indent {
                if top.kind != kind {
                    let depth = top.depth;
                    self.pop_frame();
                    self.lists.push(ListFrame::new(indent, kind, depth));
                }
                break;
            }
            self.pop_frame();
        }

        if let Some(frame) = self.lists.last_mut() {
            frame.items.push(ItemDraft {
                text: text.to_string(),
                sublists: vec![],
            });
        }
    }

    fn pop_frame(&mut self) {
        let Some(frame) = self.lists.pop() else {
            return;
        };
        let block = frame.into_block();
        match self.lists.last_mut().and_then(|f| f.items.last_mut()) {
            Some(parent) => parent.sublists.push(block),
            None => self.out.push(BlockNode::List(block)),
        }
    }

    fn close_all(&mut self) {
        self.flush_leaf();
        while !self.lists.is_empty() {
            self.pop_frame();
        }
    }

    fn flush_unterminated_fence(&mut self) {
        if let LeafState::Fence { open_line, .. } = self.leaf {
            debug!("unterminated fence opened at line {open_line}");
            self.warnings
                .push(ParseDegraded::UnterminatedFence { line: open_line });
        }
        self.flush_leaf();
    }

    fn flush_leaf(&mut self) {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => {}
            LeafState::Paragraph { lines } => {
                let text = lines.join("\n");
                if let Some((alt, src)) = standalone_image(&text) {
                    self.out.push(BlockNode::Image { src, alt });
                    return;
                }
                let spans = parse_inline(&text);
                if !spans.is_empty() {
                    self.out.push(BlockNode::Paragraph { spans });
                }
            }
            LeafState::Quote { lines } => {
                let spans = parse_inline(&lines.join("\n"));
                if !spans.is_empty() {
                    self.out.push(BlockNode::Quote { spans });
                }
            }
            LeafState::Fence {
                language, lines, ..
            } => self.out.push(BlockNode::Code {
                language,
                text: lines.join("\n"),
            }),
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
