/// Emphasis delimiter syntax (`*`, `_`).
pub struct Emphasis;

/// Whether a delimiter run may open and/or close emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flanking {
    pub can_open: bool,
    pub can_close: bool,
}

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';

    pub fn is_delimiter(b: u8) -> bool {
        b == Self::STAR || b == Self::UNDERSCORE
    }

    /// Computes flanking for a run of `ch` between `before` and `after`.
    ///
    /// An opener must be followed by non-whitespace, a closer preceded by
    /// it. `_` additionally never opens or closes inside a word.
    pub fn flanking(ch: u8, before: Option<char>, after: Option<char>) -> Flanking {
        let ws = |c: Option<char>| c.is_none_or(char::is_whitespace);
        let punct = |c: Option<char>| c.is_some_and(|c| c.is_ascii_punctuation());

        let left = !ws(after) && (!punct(after) || ws(before) || punct(before));
        let right = !ws(before) && (!punct(before) || ws(after) || punct(after));

        if ch == Self::UNDERSCORE {
            Flanking {
                can_open: left && (!right || punct(before)),
                can_close: right && (!left || punct(after)),
            }
        } else {
            Flanking {
                can_open: left,
                can_close: right,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_between_space_and_word_opens() {
        let f = Emphasis::flanking(b'*', Some(' '), Some('b'));
        assert!(f.can_open);
        assert!(!f.can_close);
    }

    #[test]
    fn star_after_word_closes() {
        let f = Emphasis::flanking(b'*', Some('d'), Some(' '));
        assert!(!f.can_open);
        assert!(f.can_close);
    }

    #[test]
    fn star_inside_word_does_both() {
        let f = Emphasis::flanking(b'*', Some('a'), Some('b'));
        assert!(f.can_open && f.can_close);
    }

    #[test]
    fn underscore_inside_word_does_neither() {
        let f = Emphasis::flanking(b'_', Some('e'), Some('c'));
        assert!(!f.can_open && !f.can_close);
    }

    #[test]
    fn surrounded_by_spaces_does_neither() {
        let f = Emphasis::flanking(b'*', Some(' '), Some(' '));
        assert!(!f.can_open && !f.can_close);
    }
}
