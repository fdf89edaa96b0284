/// ATX heading syntax (`#` .. `######`).
pub struct Heading;

/// Result of inspecting a line for a heading marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingMatch {
    /// A valid heading: level and the byte range of its text in the line.
    Heading { level: u8, start: usize, end: usize },
    /// Looks like a heading but has more than six `#`.
    TooDeep,
}

impl Heading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    pub fn detect(line: &str) -> Option<HeadingMatch> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }
        let rest = &line[indent..];
        let hashes = rest.bytes().take_while(|&b| b == Self::MARKER).count();
        if hashes == 0 {
            return None;
        }
        let after = &rest[hashes..];
        if !(after.is_empty() || after.starts_with([' ', '\t'])) {
            return None;
        }
        if hashes > Self::MAX_LEVEL {
            return Some(HeadingMatch::TooDeep);
        }

        let start = indent + hashes + (after.len() - after.trim_start().len());
        let body = Self::strip_closing_sequence(after.trim());
        Some(HeadingMatch::Heading {
            level: hashes as u8,
            start,
            end: start + body.len(),
        })
    }

    /// Drops an optional closing run of `#` (`## Title ##`). The run must be
    /// preceded by whitespace or make up the whole text.
    fn strip_closing_sequence(body: &str) -> &str {
        let without = body.trim_end_matches(Self::MARKER as char);
        if without.len() == body.len() {
            return body;
        }
        if without.is_empty() {
            return without;
        }
        if without.ends_with([' ', '\t']) {
            without.trim_end()
        } else {
            body
        }
    }
}
