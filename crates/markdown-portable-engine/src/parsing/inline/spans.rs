use super::{
    kinds::CodeSpan,
    lexer::tokenize,
    types::{InlineSpan, InlineToken, InlineTokenKind, Mark},
};

/// Lexes and resolves a block's text into marked spans.
pub fn parse_inline(s: &str) -> Vec<InlineSpan> {
    build_spans(s, &tokenize(s))
}

/// Returns `(alt, src)` when the whole text is a single image.
pub fn standalone_image(s: &str) -> Option<(String, String)> {
    match tokenize(s.trim()).as_slice() {
        [
            InlineToken {
                kind: InlineTokenKind::Image { alt, src },
                ..
            },
        ] => Some((alt.clone(), src.clone())),
        _ => None,
    }
}

/// Resolves inline tokens into spans.
///
/// Delimiters are paired first, so the marks on every span are well nested.
/// Unmatched delimiters render as their literal text. Adjacent spans with
/// identical marks are merged and empty spans dropped.
pub fn build_spans(s: &str, tokens: &[InlineToken]) -> Vec<InlineSpan> {
    let partners = pair_delimiters(tokens);
    let mut active: Vec<Mark> = vec![];
    let mut out = SpanWriter::default();

    for (i, t) in tokens.iter().enumerate() {
        match &t.kind {
            InlineTokenKind::Text => out.push(t.span.slice(s), &active),
            InlineTokenKind::Escaped => out.push(&t.span.slice(s)[1..], &active),
            InlineTokenKind::Delimiter(d) => match partners[i] {
                Some(p) if p > i => active.push(d.kind.mark()),
                Some(_) => remove_last(&mut active, |m| *m == d.kind.mark()),
                None => out.push(t.span.slice(s), &active),
            },
            InlineTokenKind::CodeSpan { inner } => {
                let marks = with_mark(&active, Mark::Code);
                out.push(CodeSpan::trim_inner(inner.slice(s)), &marks);
            }
            InlineTokenKind::LinkOpen { href } => active.push(Mark::Link { href: href.clone() }),
            InlineTokenKind::LinkClose => {
                remove_last(&mut active, |m| matches!(m, Mark::Link { .. }))
            }
            InlineTokenKind::Image { alt, src } => {
                let text = if alt.is_empty() { src } else { alt };
                let marks = with_mark(&active, Mark::Link { href: src.clone() });
                out.push(text, &marks);
            }
            InlineTokenKind::AutoLink { href } => {
                let marks = with_mark(&active, Mark::Link { href: href.clone() });
                out.push(href, &marks);
            }
        }
    }

    out.finish()
}

#[derive(Clone, Copy)]
enum Open {
    Delim(usize),
    LinkBarrier,
}

/// Pairs each closing delimiter with the nearest open delimiter of the same
/// kind and character. The search stops at a link barrier, and openers
/// skipped over are discarded, which is what keeps pairs from crossing.
fn pair_delimiters(tokens: &[InlineToken]) -> Vec<Option<usize>> {
    let mut partners = vec![None; tokens.len()];
    let mut stack: Vec<Open> = vec![];

    for (i, t) in tokens.iter().enumerate() {
        match &t.kind {
            InlineTokenKind::Delimiter(d) => {
                let mut closed = false;
                if d.flanking.can_close {
                    let found = stack.iter().rposition(|o| match o {
                        Open::LinkBarrier => true,
                        Open::Delim(j) => matches!(
                            &tokens[*j].kind,
                            InlineTokenKind::Delimiter(o) if o.kind == d.kind && o.ch == d.ch
                        ),
                    });
                    if let Some(pos) = found
                        && let Open::Delim(j) = stack[pos]
                    {
                        stack.truncate(pos);
                        partners[j] = Some(i);
                        partners[i] = Some(j);
                        closed = true;
                    }
                }
                if !closed && d.flanking.can_open {
                    stack.push(Open::Delim(i));
                }
            }
            InlineTokenKind::LinkOpen { .. } => stack.push(Open::LinkBarrier),
            InlineTokenKind::LinkClose => {
                if let Some(pos) = stack.iter().rposition(|o| matches!(o, Open::LinkBarrier)) {
                    stack.truncate(pos);
                }
            }
            _ => {}
        }
    }

    partners
}

fn remove_last(marks: &mut Vec<Mark>, pred: impl Fn(&Mark) -> bool) {
    if let Some(pos) = marks.iter().rposition(pred) {
        marks.remove(pos);
    }
}

fn with_mark(active: &[Mark], extra: Mark) -> Vec<Mark> {
    let mut marks = active.to_vec();
    marks.push(extra);
    marks
}

#[derive(Default)]
struct SpanWriter {
    spans: Vec<InlineSpan>,
}

impl SpanWriter {
    fn push(&mut self, text: &str, marks: &[Mark]) {
        if text.is_empty() {
            return;
        }
        let mut set: Vec<Mark> = Vec::with_capacity(marks.len());
        for m in marks {
            if !set.contains(m) {
                set.push(m.clone());
            }
        }
        match self.spans.last_mut() {
            Some(last) if last.marks == set => last.text.push_str(text),
            _ => self.spans.push(InlineSpan::marked(text, set)),
        }
    }

    fn finish(self) -> Vec<InlineSpan> {
        self.spans
    }
}
