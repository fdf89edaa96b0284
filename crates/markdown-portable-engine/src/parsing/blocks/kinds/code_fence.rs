/// Which character a fence is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// A fence line: its character, run width and the info string after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub width: usize,
    pub info: String,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_WIDTH: usize = 3;

    /// Detects a fence opener or closer. Up to three spaces of indentation
    /// are allowed.
    pub fn sig(line: &str) -> Option<FenceSig> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }
        let rest = &line[indent..];
        let (kind, ch) = match rest.as_bytes().first() {
            Some(&Self::BACKTICK) => (FenceKind::Backticks, Self::BACKTICK),
            Some(&Self::TILDE) => (FenceKind::Tildes, Self::TILDE),
            _ => return None,
        };
        let width = rest.bytes().take_while(|&b| b == ch).count();
        if width < Self::MIN_WIDTH {
            return None;
        }
        let info = rest[width..].trim();
        // A backtick info string may not itself contain backticks.
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(FenceSig {
            kind,
            width,
            info: info.to_string(),
        })
    }

    /// The language tag is the first word of the info string.
    pub fn language(sig: &FenceSig) -> Option<String> {
        sig.info
            .split_whitespace()
            .next()
            .map(|s| s.to_string())
    }

    /// A closer uses the same character, is at least as wide as the opener
    /// and carries no info string.
    pub fn closes(open: &FenceSig, candidate: Option<&FenceSig>) -> bool {
        match candidate {
            Some(c) => c.kind == open.kind && c.width >= open.width && c.info.is_empty(),
            None => false,
        }
    }
}
