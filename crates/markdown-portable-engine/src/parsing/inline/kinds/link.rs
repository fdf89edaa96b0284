/// Inline link and image syntax: `[text](href)`, `![alt](src)`.
pub struct Link;

/// Byte offsets (relative to the `[`) of a matched link construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParts {
    /// Offset of the `]` closing the link text.
    pub text_end: usize,
    /// Offset just past the closing `)`.
    pub end: usize,
    pub href: String,
}

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const IMAGE: &'static [u8; 2] = b"![";

    /// Matches a link starting with `[` at the start of `s`.
    ///
    /// Brackets nest, backslash escapes are skipped, and a code span inside
    /// the text hides its brackets. The destination may be wrapped in `<>`
    /// and may carry a title after whitespace, which is dropped.
    pub fn parse(s: &str) -> Option<LinkParts> {
        let b = s.as_bytes();
        if b.first() != Some(&Self::OPEN) {
            return None;
        }

        let mut depth = 0usize;
        let mut i = 0;
        let text_end = loop {
            let c = *b.get(i)?;
            match c {
                b'\\' => i += 1,
                b'`' => {
                    let run = b[i..].iter().take_while(|&&x| x == b'`').count();
                    if let Some(close) = super::CodeSpan::find_close(&s[i + run..], run) {
                        i += run + close + run - 1;
                    } else {
                        i += run - 1;
                    }
                }
                Self::OPEN => depth += 1,
                Self::CLOSE => {
                    depth -= 1;
                    if depth == 0 {
                        break i;
                    }
                }
                _ => {}
            }
            i += 1;
        };

        if b.get(text_end + 1) != Some(&Self::DEST_OPEN) {
            return None;
        }
        let dest_start = text_end + 2;
        let close = s[dest_start..].find(Self::DEST_CLOSE as char)? + dest_start;
        let raw = s[dest_start..close].trim();
        if raw.contains('\n') {
            return None;
        }
        let href = match raw.strip_prefix('<') {
            Some(inner) => inner.split('>').next().unwrap_or(""),
            None => raw.split_whitespace().next().unwrap_or(""),
        };

        Some(LinkParts {
            text_end,
            end: close + 1,
            href: href.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_link() {
        let p = Link::parse("[docs](https://example.com) after").unwrap();
        assert_eq!(p.text_end, 5);
        assert_eq!(p.end, 27);
        assert_eq!(p.href, "https://example.com");
    }

    #[test]
    fn title_is_dropped() {
        let p = Link::parse(r#"[a](/x "Title")"#).unwrap();
        assert_eq!(p.href, "/x");
    }

    #[test]
    fn angle_destination() {
        let p = Link::parse("[a](<my page.md>)").unwrap();
        assert_eq!(p.href, "my page.md");
    }

    #[test]
    fn nested_brackets_in_text() {
        let p = Link::parse("[a [b] c](/y)").unwrap();
        assert_eq!(p.text_end, 8);
    }

    #[test]
    fn bracket_inside_code_span_is_hidden() {
        let p = Link::parse("[`]` x](/z)").unwrap();
        assert_eq!(p.text_end, 6);
    }

    #[test]
    fn not_a_link() {
        assert_eq!(Link::parse("[a] (b)"), None);
        assert_eq!(Link::parse("[unclosed"), None);
        assert_eq!(Link::parse("[a](no close"), None);
    }
}
