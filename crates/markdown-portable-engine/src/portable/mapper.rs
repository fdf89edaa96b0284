use std::fmt::Write;

use crate::parsing::{
    blocks::{BlockNode, ListBlock, kinds::ListKind},
    inline::{InlineSpan, Mark},
};

use super::{
    keys::{block_key, child_key},
    types::{
        BlockStyle, CodeBlock, DECORATOR_CODE, DECORATOR_EM, DECORATOR_STRONG, ImageBlock,
        ListItemKind, MarkDef, PortableBlock, PortableSpan, TextBlock,
    },
};

/// Maps a block tree to portable blocks.
///
/// Every top-level node yields one block, except lists: each list item
/// becomes its own text block (depth-first, sublists after their item).
pub fn map(blocks: &[BlockNode]) -> Vec<PortableBlock> {
    let mut m = Mapper::default();
    for b in blocks {
        m.block(b);
    }
    m.out
}

#[derive(Default)]
struct Mapper {
    out: Vec<PortableBlock>,
}

impl Mapper {
    fn block(&mut self, b: &BlockNode) {
        match b {
            BlockNode::Heading { level, spans } => {
                self.text(BlockStyle::Heading(*level), None, spans)
            }
            BlockNode::Paragraph { spans } => self.text(BlockStyle::Normal, None, spans),
            BlockNode::Quote { spans } => self.text(BlockStyle::Quote, None, spans),
            BlockNode::List(list) => self.list(list),
            BlockNode::Code { language, text } => {
                let content = format!("{}\0{}", language.as_deref().unwrap_or(""), text);
                let key = block_key(self.out.len(), "code", &content);
                self.out.push(PortableBlock::Code(CodeBlock {
                    key,
                    language: language.clone(),
                    code: text.clone(),
                }));
            }
            BlockNode::Image { src, alt } => {
                let key = block_key(self.out.len(), "image", &format!("{src}\0{alt}"));
                self.out.push(PortableBlock::Image(ImageBlock {
                    key,
                    src: src.clone(),
                    alt: (!alt.is_empty()).then(|| alt.clone()),
                }));
            }
        }
    }

    fn list(&mut self, list: &ListBlock) {
        let kind = match list.kind {
            ListKind::Unordered => ListItemKind::Unordered,
            ListKind::Ordered => ListItemKind::Ordered,
        };
        let level = u32::try_from(list.depth).unwrap_or(u32::MAX);
        for item in &list.items {
            // An item with no text still carries its sublists.
            if !item.spans.is_empty() {
                self.text(BlockStyle::Normal, Some((kind, level)), &item.spans);
            }
            for sub in &item.sublists {
                self.list(sub);
            }
        }
    }

    fn text(&mut self, style: BlockStyle, list: Option<(ListItemKind, u32)>, spans: &[InlineSpan]) {
        let key = block_key(self.out.len(), "block", &fingerprint(style, list, spans));

        let mut mark_defs: Vec<MarkDef> = vec![];
        let children = spans
            .iter()
            .enumerate()
            .map(|(i, s)| PortableSpan {
                key: child_key(&key, "span", i, &s.text),
                text: s.text.clone(),
                marks: s
                    .marks
                    .iter()
                    .map(|m| mark_name(m, &key, &mut mark_defs))
                    .collect(),
            })
            .collect();

        self.out.push(PortableBlock::Text(TextBlock {
            key,
            style,
            list_item: list.map(|(k, _)| k),
            level: list.map(|(_, l)| l),
            children,
            mark_defs,
        }));
    }
}

/// Decorators map to their names; links are lifted into the block's mark
/// defs, one def per distinct href.
fn mark_name(mark: &Mark, block: &str, defs: &mut Vec<MarkDef>) -> String {
    match mark {
        Mark::Strong => DECORATOR_STRONG.to_string(),
        Mark::Emphasis => DECORATOR_EM.to_string(),
        Mark::Code => DECORATOR_CODE.to_string(),
        Mark::Link { href } => {
            if let Some(existing) = defs
                .iter()
                .find(|d| matches!(d, MarkDef::Link { href: h, .. } if h == href))
            {
                return existing.key().to_string();
            }
            let key = child_key(block, "link", defs.len(), href);
            defs.push(MarkDef::Link {
                key: key.clone(),
                href: href.clone(),
            });
            key
        }
    }
}

/// Canonical content of a text block, the input to its key.
fn fingerprint(style: BlockStyle, list: Option<(ListItemKind, u32)>, spans: &[InlineSpan]) -> String {
    let mut out = style.to_string();
    if let Some((kind, level)) = list {
        let _ = write!(out, "|{kind:?}:{level}");
    }
    for s in spans {
        out.push('\u{1e}');
        for m in &s.marks {
            match m {
                Mark::Strong => out.push_str("S,"),
                Mark::Emphasis => out.push_str("E,"),
                Mark::Code => out.push_str("C,"),
                Mark::Link { href } => {
                    let _ = write!(out, "L({href}),");
                }
            }
        }
        out.push('\u{1f}');
        out.push_str(&s.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{parse_document, rope::SourceText};
    use pretty_assertions::assert_eq;

    fn convert(src: &str) -> Vec<PortableBlock> {
        map(&parse_document(&SourceText::new(src)).blocks)
    }

    fn text_block(b: &PortableBlock) -> &TextBlock {
        match b {
            PortableBlock::Text(t) => t,
            other => panic!("expected text block, got {other:?}"),
        }
    }

    fn texts_and_marks(t: &TextBlock) -> Vec<(&str, Vec<&str>)> {
        t.children
            .iter()
            .map(|s| (s.text.as_str(), s.marks.iter().map(String::as_str).collect()))
            .collect()
    }

    #[test]
    fn heading_and_paragraph_example() {
        let blocks = convert("# Title\n\nSome **bold** text.");
        assert_eq!(blocks.len(), 2);

        let h = text_block(&blocks[0]);
        assert_eq!(h.style, BlockStyle::Heading(1));
        assert_eq!(texts_and_marks(h), vec![("Title", vec![])]);

        let p = text_block(&blocks[1]);
        assert_eq!(p.style, BlockStyle::Normal);
        assert_eq!(
            texts_and_marks(p),
            vec![
                ("Some ", vec![]),
                ("bold", vec!["strong"]),
                (" text.", vec![])
            ]
        );
    }

    #[test]
    fn mapping_is_deterministic() {
        let src = "# A\n\n- x [l](u)\n  - y\n\n```sh\nls\n```\n";
        assert_eq!(convert(src), convert(src));
    }

    #[test]
    fn list_items_flatten_with_level() {
        let blocks = convert("1. a\n   - b\n2. c");
        let shape: Vec<_> = blocks
            .iter()
            .map(|b| {
                let t = text_block(b);
                (t.list_item, t.level, t.children[0].text.clone())
            })
            .collect();
        assert_eq!(
            shape,
            vec![
                (Some(ListItemKind::Ordered), Some(1), "a".to_string()),
                (Some(ListItemKind::Unordered), Some(2), "b".to_string()),
                (Some(ListItemKind::Ordered), Some(1), "c".to_string()),
            ]
        );
    }

    #[test]
    fn empty_items_emit_no_block_but_keep_sublists() {
        let blocks = convert("-\n  - child\n-\n- last");
        let shape: Vec<_> = blocks
            .iter()
            .map(|b| {
                let t = text_block(b);
                (t.level, t.children.len(), t.children[0].text.clone())
            })
            .collect();
        assert_eq!(
            shape,
            vec![(Some(2), 1, "child".to_string()), (Some(1), 1, "last".to_string())]
        );
    }

    #[test]
    fn links_become_mark_defs() {
        let blocks = convert("see [a](https://x.io) and [b](https://x.io) or [c](/y)");
        let t = text_block(&blocks[0]);
        assert_eq!(t.mark_defs.len(), 2);
        let first = t.mark_defs[0].key();
        assert_eq!(t.children[1].marks, vec![first.to_string()]);
        assert_eq!(t.children[3].marks, vec![first.to_string()]);
        assert_ne!(t.children[5].marks[0], first);
    }

    #[test]
    fn code_and_image_blocks() {
        let blocks = convert("```rust\nfn x() {}\n```\n\n![](pic.png)");
        assert!(matches!(
            &blocks[0],
            PortableBlock::Code(CodeBlock { language: Some(l), code, .. })
                if l == "rust" && code == "fn x() {}"
        ));
        assert!(matches!(
            &blocks[1],
            PortableBlock::Image(ImageBlock { src, alt: None, .. }) if src == "pic.png"
        ));
    }

    #[test]
    fn identical_blocks_at_different_positions_get_different_keys() {
        let blocks = convert("same\n\nsame");
        assert_ne!(blocks[0].key(), blocks[1].key());
    }

    #[test]
    fn editing_one_block_keeps_earlier_keys() {
        let a = convert("one\n\ntwo");
        let b = convert("one\n\ntwo!");
        assert_eq!(a[0].key(), b[0].key());
        assert_ne!(a[1].key(), b[1].key());
    }
}
