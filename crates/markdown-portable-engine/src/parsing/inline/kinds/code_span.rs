/// Code span syntax. Code spans are raw zones: no other inline parsing
/// occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Finds the closing run of exactly `width` backticks in `rest`,
    /// returning its byte offset.
    pub fn find_close(rest: &str, width: usize) -> Option<usize> {
        let b = rest.as_bytes();
        let mut i = 0;
        while i < b.len() {
            if b[i] == Self::TICK {
                let run = b[i..].iter().take_while(|&&x| x == Self::TICK).count();
                if run == width {
                    return Some(i);
                }
                i += run;
            } else {
                i += 1;
            }
        }
        None
    }

    /// Strips one leading and one trailing space when both are present and
    /// the content is not all spaces (`` ` `` `` `a` `` `` ` `` reads as `` `a` ``).
    pub fn trim_inner(inner: &str) -> &str {
        if inner.len() >= 2
            && inner.starts_with(' ')
            && inner.ends_with(' ')
            && !inner.bytes().all(|b| b == b' ')
        {
            &inner[1..inner.len() - 1]
        } else {
            inner
        }
    }
}
