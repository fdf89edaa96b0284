use std::sync::OnceLock;

use regex::Regex;

/// Whether a list is numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Unordered,
    Ordered,
}

/// A list item marker found at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    pub kind: ListKind,
    /// Leading whitespace width with tabs expanded.
    pub indent: usize,
    /// Byte offset in the line where the item text begins.
    pub content_start: usize,
}

pub struct ListItemSyntax;

impl ListItemSyntax {
    pub const TAB_WIDTH: usize = 4;

    pub fn detect(line: &str) -> Option<ListMarker> {
        static MARKER: OnceLock<Regex> = OnceLock::new();
        let re = MARKER.get_or_init(|| {
            Regex::new(r"^([ \t]*)(?:([-*+])|(\d{1,9})[.)])(?:[ \t]+|$)")
                .expect("list marker regex is valid")
        });

        let caps = re.captures(line)?;
        let whole = caps.get(0)?;
        let indent = Self::indent_width(caps.get(1).map_or("", |m| m.as_str()));

        let kind = match (caps.get(2), caps.get(3)) {
            (Some(_), _) => ListKind::Unordered,
            (None, Some(_)) => ListKind::Ordered,
            (None, None) => return None,
        };

        Some(ListMarker {
            kind,
            indent,
            content_start: whole.end(),
        })
    }

    /// Column width of leading whitespace, tabs rounding up to the next stop.
    pub fn indent_width(ws: &str) -> usize {
        ws.chars().fold(0, |col, c| match c {
            '\t' => col + Self::TAB_WIDTH - (col % Self::TAB_WIDTH),
            _ => col + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- item", ListKind::Unordered, 0, "item")]
    #[case("* item", ListKind::Unordered, 0, "item")]
    #[case("+ item", ListKind::Unordered, 0, "item")]
    #[case("  - nested", ListKind::Unordered, 2, "nested")]
    #[case("\t- tabbed", ListKind::Unordered, 4, "tabbed")]
    #[case("1. first", ListKind::Ordered, 0, "first")]
    #[case("42) answer", ListKind::Ordered, 0, "answer")]
    #[case("-", ListKind::Unordered, 0, "")]
    fn detects_markers(
        #[case] line: &str,
        #[case] kind: ListKind,
        #[case] indent: usize,
        #[case] text: &str,
    ) {
        let m = ListItemSyntax::detect(line).unwrap();
        assert_eq!(m.kind, kind);
        assert_eq!(m.indent, indent);
        assert_eq!(&line[m.content_start..], text);
    }

    #[rstest]
    #[case("**bold** text")]
    #[case("-dash")]
    #[case("1.5 is a number")]
    #[case("plain text")]
    fn rejects_non_markers(#[case] line: &str) {
        assert_eq!(ListItemSyntax::detect(line), None);
    }

    #[test]
    fn mixed_tab_indent_rounds_to_tab_stop() {
        assert_eq!(ListItemSyntax::indent_width("  \t"), 4);
        assert_eq!(ListItemSyntax::indent_width("    \t"), 8);
    }
}
