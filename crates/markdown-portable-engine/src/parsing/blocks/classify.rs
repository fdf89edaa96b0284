use crate::parsing::rope::{LineRef, SourceText};

use super::{
    kinds::{
        BlockQuote, CodeFence, FenceSig, Heading, HeadingMatch, ListItemSyntax, Paragraph,
        UnsupportedConstruct,
    },
    token::{Token, TokenKind},
};

/// Splits source text into block tokens, one per line.
///
/// Pure function of `source`; unrecognized syntax becomes `Text`.
pub fn tokenize(source: &SourceText) -> Vec<Token> {
    let mut tokenizer = Tokenizer::default();
    source.lines().map(|lr| tokenizer.classify(&lr)).collect()
}

/// Line classifier. The only state carried between lines is the open fence,
/// so that fenced content is never re-classified as block syntax.
#[derive(Debug, Default)]
pub struct Tokenizer {
    open_fence: Option<FenceSig>,
}

impl Tokenizer {
    pub fn classify(&mut self, lr: &LineRef) -> Token {
        let line = lr.text.as_str();
        let token = |kind: TokenKind, level: usize, text: &str| Token {
            kind,
            span: lr.span,
            level,
            line: lr.number,
            text: text.to_string(),
        };

        if let Some(open) = &self.open_fence {
            let sig = CodeFence::sig(line);
            if CodeFence::closes(open, sig.as_ref()) {
                self.open_fence = None;
                return token(TokenKind::FenceClose, 0, "");
            }
            return token(TokenKind::CodeLine, 0, line);
        }

        if line.trim().is_empty() {
            return token(TokenKind::Blank, 0, "");
        }

        if let Some(sig) = CodeFence::sig(line) {
            let language = CodeFence::language(&sig);
            self.open_fence = Some(sig.clone());
            return token(
                TokenKind::FenceOpen {
                    fence: sig,
                    language,
                },
                0,
                "",
            );
        }

        match Heading::detect(line) {
            Some(HeadingMatch::Heading { level, start, end }) => {
                return token(
                    TokenKind::Heading { level },
                    level as usize,
                    &line[start..end],
                );
            }
            Some(HeadingMatch::TooDeep) => {
                return token(
                    TokenKind::Text {
                        degraded: Some(UnsupportedConstruct::DeepHeading),
                    },
                    0,
                    line.trim(),
                );
            }
            None => {}
        }

        let (depth, idx) = BlockQuote::strip_prefixes(line);
        if depth > 0 {
            return token(
                TokenKind::Quote { depth },
                depth as usize,
                line[idx..].trim(),
            );
        }

        // Checked before list markers: `* * *` is a break, not an item.
        let degraded = Paragraph::unsupported(line);
        if degraded.is_none()
            && let Some(marker) = ListItemSyntax::detect(line)
        {
            return token(
                TokenKind::ListItem { kind: marker.kind },
                marker.indent,
                line[marker.content_start..].trim_end(),
            );
        }

        token(TokenKind::Text { degraded }, 0, line.trim())
    }
}
