//! Structural checks over parser output, asserted by tests.

use super::{
    blocks::{BlockNode, ListBlock, Token},
    inline::InlineSpan,
    rope::SourceText,
};

pub fn check_tokens(source: &SourceText, tokens: &[Token]) {
    let n = source.len();
    let mut prev_line = 0;
    for t in tokens {
        assert!(
            t.span.start <= t.span.end && t.span.end <= n,
            "token span out of bounds: {:?} (source len: {})",
            t.span,
            n
        );
        assert_eq!(t.line, prev_line + 1, "tokens must be one per line, in order");
        prev_line = t.line;
    }
}

pub fn check_blocks(blocks: &[BlockNode]) {
    for b in blocks {
        match b {
            BlockNode::Heading { level, spans } => {
                assert!((1..=6).contains(level), "heading level out of range: {level}");
                assert!(!spans.is_empty(), "empty heading: {b:?}");
                check_spans(spans);
            }
            BlockNode::Paragraph { spans } | BlockNode::Quote { spans } => {
                assert!(!spans.is_empty(), "empty text block: {b:?}");
                check_spans(spans);
            }
            BlockNode::List(list) => check_list(list, 1),
            BlockNode::Code { .. } => {}
            BlockNode::Image { src, .. } => assert!(!src.is_empty(), "image without src"),
        }
    }
}

fn check_list(list: &ListBlock, depth: usize) {
    assert_eq!(list.depth, depth, "list depth mismatch");
    assert!(!list.items.is_empty(), "list without items");
    for item in &list.items {
        check_spans(&item.spans);
        for sub in &item.sublists {
            check_list(sub, depth + 1);
        }
    }
}

fn check_spans(spans: &[InlineSpan]) {
    for (i, s) in spans.iter().enumerate() {
        assert!(!s.text.is_empty(), "empty span at {i}");
        for (j, m) in s.marks.iter().enumerate() {
            assert!(
                !s.marks[..j].contains(m),
                "duplicate mark {m:?} in span {i}"
            );
        }
        if i > 0 {
            assert_ne!(
                spans[i - 1].marks,
                s.marks,
                "adjacent spans {} and {i} share marks and should be merged",
                i - 1
            );
        }
    }
}
