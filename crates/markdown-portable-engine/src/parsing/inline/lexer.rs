use crate::parsing::rope::Span;

use super::{
    cursor::Cursor,
    kinds::{AutoLink, CodeSpan, Emphasis, Link},
    types::{DelimKind, Delimiter, InlineToken, InlineTokenKind},
};

/// Splits a block's text into inline tokens.
///
/// Runs after block boundaries are fixed, so markers never cross blocks.
/// Precedence at each position: escape, code span (raw zone), image, link,
/// bare URL, emphasis delimiter.
pub fn tokenize(s: &str) -> Vec<InlineToken> {
    let mut out = vec![];
    lex_range(s, 0, s.len(), false, &mut out);
    out
}

fn lex_range(s: &str, start: usize, end: usize, in_link: bool, out: &mut Vec<InlineToken>) {
    let mut cur = Cursor::with_range(s, start, end);
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<InlineToken>, start: usize, end: usize) {
        if end > start {
            out.push(InlineToken {
                kind: InlineTokenKind::Text,
                span: Span { start, end },
            });
        }
    }

    while !cur.eof() {
        let at = cur.pos();
        let found = try_escape(&mut cur)
            .or_else(|| try_code_span(&mut cur))
            .or_else(|| try_image(&mut cur))
            .or_else(|| (!in_link).then(|| try_link(&mut cur)).flatten())
            .or_else(|| (!in_link).then(|| try_autolink(&mut cur)).flatten())
            .or_else(|| try_delimiters(&mut cur));

        match found {
            Some(tokens) => {
                flush_text(out, text_start, at);
                text_start = cur.pos();
                out.extend(tokens);
            }
            None => skip_literal(&mut cur),
        }
    }

    flush_text(out, text_start, cur.pos());
}

/// Backtick and delimiter runs that did not form a construct stay literal
/// as a whole, so a shorter tail of the run cannot match later.
fn skip_literal(cur: &mut Cursor<'_>) {
    match cur.peek() {
        Some(b) if b == CodeSpan::TICK || Emphasis::is_delimiter(b) => {
            let run = cur.run_len(b);
            cur.bump_n(run);
        }
        _ => {
            cur.bump();
        }
    }
}

fn try_escape(cur: &mut Cursor<'_>) -> Option<Vec<InlineToken>> {
    if cur.peek() != Some(b'\\') {
        return None;
    }
    let next = cur.s.as_bytes().get(cur.pos() + 1).copied()?;
    if cur.pos() + 1 >= cur.end || !next.is_ascii_punctuation() {
        return None;
    }
    let start = cur.pos();
    cur.bump_n(2);
    Some(vec![InlineToken {
        kind: InlineTokenKind::Escaped,
        span: Span::new(start, cur.pos()),
    }])
}

fn try_code_span(cur: &mut Cursor<'_>) -> Option<Vec<InlineToken>> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }
    let start = cur.pos();
    let width = cur.run_len(CodeSpan::TICK);
    let close = CodeSpan::find_close(&cur.rest()[width..], width)?;
    let inner = Span::new(start + width, start + width + close);
    cur.bump_n(width + close + width);

    Some(vec![InlineToken {
        kind: InlineTokenKind::CodeSpan { inner },
        span: Span::new(start, cur.pos()),
    }])
}

fn try_image(cur: &mut Cursor<'_>) -> Option<Vec<InlineToken>> {
    if !cur.starts_with(Link::IMAGE) {
        return None;
    }
    let start = cur.pos();
    let parts = Link::parse(&cur.rest()[1..])?;
    let alt = cur.s[start + 2..start + 1 + parts.text_end].to_string();
    cur.bump_n(1 + parts.end);

    Some(vec![InlineToken {
        kind: InlineTokenKind::Image {
            alt,
            src: parts.href,
        },
        span: Span::new(start, cur.pos()),
    }])
}

/// Emits `LinkOpen`, the lexed link text, then `LinkClose`. Links do not nest.
fn try_link(cur: &mut Cursor<'_>) -> Option<Vec<InlineToken>> {
    if cur.peek() != Some(Link::OPEN) {
        return None;
    }
    let start = cur.pos();
    let parts = Link::parse(cur.rest())?;

    let mut tokens = vec![InlineToken {
        kind: InlineTokenKind::LinkOpen { href: parts.href },
        span: Span::new(start, start + 1),
    }];
    lex_range(cur.s, start + 1, start + parts.text_end, true, &mut tokens);
    tokens.push(InlineToken {
        kind: InlineTokenKind::LinkClose,
        span: Span::new(start + parts.text_end, start + parts.end),
    });

    cur.bump_n(parts.end);
    Some(tokens)
}

fn try_autolink(cur: &mut Cursor<'_>) -> Option<Vec<InlineToken>> {
    if !AutoLink::SCHEMES.iter().any(|s| cur.starts_with(s)) {
        return None;
    }
    if cur
        .char_before(cur.pos())
        .is_some_and(|c| c.is_alphanumeric())
    {
        return None;
    }
    let start = cur.pos();
    let len = AutoLink::match_len(cur.rest())?;
    cur.bump_n(len);

    Some(vec![InlineToken {
        kind: InlineTokenKind::AutoLink {
            href: cur.s[start..start + len].to_string(),
        },
        span: Span::new(start, cur.pos()),
    }])
}

/// Runs longer than three are left as literal text.
fn try_delimiters(cur: &mut Cursor<'_>) -> Option<Vec<InlineToken>> {
    let ch = cur.peek().filter(|&b| Emphasis::is_delimiter(b))?;
    let start = cur.pos();
    let run = cur.run_len(ch);
    let flanking = Emphasis::flanking(ch, cur.char_before(start), cur.char_at(start + run));

    let kinds: &[DelimKind] = match run {
        1 => &[DelimKind::Emphasis],
        2 => &[DelimKind::Strong],
        3 if flanking.can_close && !flanking.can_open => &[DelimKind::Emphasis, DelimKind::Strong],
        3 => &[DelimKind::Strong, DelimKind::Emphasis],
        _ => return None,
    };
    cur.bump_n(run);

    let mut at = start;
    let tokens = kinds
        .iter()
        .map(|&kind| {
            let len = match kind {
                DelimKind::Strong => 2,
                DelimKind::Emphasis => 1,
            };
            let span = Span::new(at, at + len);
            at += len;
            InlineToken {
                kind: InlineTokenKind::Delimiter(Delimiter { kind, ch, flanking }),
                span,
            }
        })
        .collect();
    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(s: &str) -> Vec<InlineTokenKind> {
        tokenize(s).into_iter().map(|t| t.kind).collect()
    }

    fn texts(s: &str) -> Vec<&str> {
        tokenize(s).into_iter().map(|t| t.span.slice(s)).collect()
    }

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(kinds("hello world"), vec![InlineTokenKind::Text]);
    }

    #[test]
    fn strong_markers_split_text() {
        assert_eq!(texts("Some **bold** text."), vec!["Some ", "**", "bold", "**", " text."]);
    }

    #[test]
    fn code_span_suppresses_markers() {
        let tokens = tokenize("`**not bold**`");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(
            tokens[0].kind,
            InlineTokenKind::CodeSpan { inner: Span { start: 1, end: 13 } }
        ));
    }

    #[test]
    fn unclosed_code_run_is_text() {
        assert_eq!(kinds("``a`"), vec![InlineTokenKind::Text]);
    }

    #[test]
    fn link_wraps_lexed_text() {
        let s = "[**a**](/x)";
        let k = kinds(s);
        assert_eq!(k.len(), 5);
        assert_eq!(
            k[0],
            InlineTokenKind::LinkOpen {
                href: "/x".to_string()
            }
        );
        assert!(matches!(k[1], InlineTokenKind::Delimiter(_)));
        assert_eq!(k[4], InlineTokenKind::LinkClose);
        assert_eq!(texts(s)[4], "](/x)");
    }

    #[test]
    fn links_do_not_nest() {
        let k = kinds("[a [b](/i) c](/o)");
        let opens = k
            .iter()
            .filter(|k| matches!(k, InlineTokenKind::LinkOpen { .. }))
            .count();
        assert_eq!(opens, 1);
    }

    #[test]
    fn image_token() {
        assert_eq!(
            kinds("![a cat](cat.png)"),
            vec![InlineTokenKind::Image {
                alt: "a cat".to_string(),
                src: "cat.png".to_string()
            }]
        );
    }

    #[test]
    fn autolink_keeps_underscores() {
        assert_eq!(
            kinds("see https://a.io/x_y_z."),
            vec![
                InlineTokenKind::Text,
                InlineTokenKind::AutoLink {
                    href: "https://a.io/x_y_z".to_string()
                },
                InlineTokenKind::Text,
            ]
        );
    }

    #[test]
    fn escape_hides_marker() {
        assert_eq!(texts(r"a \*b"), vec!["a ", r"\*", "b"]);
        assert_eq!(kinds(r"a \*b")[1], InlineTokenKind::Escaped);
    }

    #[test]
    fn long_runs_are_literal() {
        assert_eq!(kinds("a **** b"), vec![InlineTokenKind::Text]);
    }

    #[test]
    fn triple_run_splits_by_position() {
        let tokens = tokenize("***x***");
        let ks: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t.kind {
                InlineTokenKind::Delimiter(d) => Some(d.kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            ks,
            vec![
                DelimKind::Strong,
                DelimKind::Emphasis,
                DelimKind::Emphasis,
                DelimKind::Strong
            ]
        );
    }
}
