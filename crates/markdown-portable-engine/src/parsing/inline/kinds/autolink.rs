use std::sync::OnceLock;

use regex::Regex;

/// Bare `http(s)://` URLs in running text.
pub struct AutoLink;

impl AutoLink {
    pub const SCHEMES: [&'static [u8]; 2] = [b"http://", b"https://"];

    /// Length in bytes of a URL at the start of `s`, with trailing
    /// punctuation that typically ends a sentence trimmed off.
    pub fn match_len(s: &str) -> Option<usize> {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        let url_regex = URL_REGEX
            .get_or_init(|| Regex::new(r"^https?://[^\s<>\[\]]+").expect("Invalid URL regex"));

        let m = url_regex.find(s)?;
        let url = m.as_str();
        let trimmed = url.trim_end_matches(['.', ',', ':', ';', '!', '?', ')', ']', '}', '*', '_']);
        let scheme_len = if trimmed.starts_with("https://") { 8 } else { 7 };
        (trimmed.len() > scheme_len).then_some(trimmed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_punctuation_is_trimmed() {
        assert_eq!(AutoLink::match_len("https://example.com."), Some(19));
        assert_eq!(AutoLink::match_len("http://a.io/x), more"), Some(13));
    }

    #[test]
    fn scheme_alone_is_not_a_link() {
        assert_eq!(AutoLink::match_len("https://"), None);
        assert_eq!(AutoLink::match_len("https://."), None);
    }

    #[test]
    fn must_start_at_scheme() {
        assert_eq!(AutoLink::match_len("see https://a.io"), None);
    }
}
