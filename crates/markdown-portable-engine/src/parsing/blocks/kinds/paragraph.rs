/// Paragraph block type.
///
/// Paragraphs have no delimiters: they are the fallback for every line no
/// other block opener claims. Some constructs are recognized here only so
/// they can be reported when they degrade to paragraph text.
pub struct Paragraph;

/// Block syntax we recognize but do not convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedConstruct {
    ThematicBreak,
    Table,
    DeepHeading,
}

impl UnsupportedConstruct {
    pub fn name(self) -> &'static str {
        match self {
            UnsupportedConstruct::ThematicBreak => "thematic break",
            UnsupportedConstruct::Table => "table",
            UnsupportedConstruct::DeepHeading => "heading deeper than level 6",
        }
    }
}

impl Paragraph {
    pub fn unsupported(line: &str) -> Option<UnsupportedConstruct> {
        let t = line.trim();
        if Self::is_thematic_break(t) {
            return Some(UnsupportedConstruct::ThematicBreak);
        }
        if t.len() > 1 && t.starts_with('|') && t.ends_with('|') {
            return Some(UnsupportedConstruct::Table);
        }
        None
    }

    fn is_thematic_break(t: &str) -> bool {
        let Some(first) = t.chars().next() else {
            return false;
        };
        if !matches!(first, '-' | '*' | '_') {
            return false;
        }
        let mut count = 0;
        for c in t.chars() {
            if c == first {
                count += 1;
            } else if c != ' ' && c != '\t' {
                return false;
            }
        }
        count >= 3
    }
}
