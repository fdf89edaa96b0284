use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line of the source with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text with the trailing `\n` / `\r\n` removed.
    pub text: String,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` so that spans account for newline bytes; the text handed
/// out is stripped of them.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(idx, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            number: idx + 1,
            span: Span { start, end: offset },
            text: line.trim_end_matches(['\r', '\n']).to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_include_newlines() {
        let rope = Rope::from("ab\ncd\r\nef");
        let lines: Vec<_> = lines_with_spans(&rope).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].span, Span::new(0, 3));
        assert_eq!(lines[1].span, Span::new(3, 7));
        assert_eq!(lines[2].span, Span::new(7, 9));
        assert_eq!(lines[1].text, "cd");
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn empty_rope_has_no_lines() {
        let rope = Rope::from("");
        assert_eq!(lines_with_spans(&rope).count(), 0);
    }
}
