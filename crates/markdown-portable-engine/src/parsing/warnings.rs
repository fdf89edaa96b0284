use serde::Serialize;

/// Recoverable parse issues. Conversion always continues past these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParseDegraded {
    #[error("line {line}: code fence never closed; closed at end of input")]
    UnterminatedFence { line: usize },

    #[error("line {line}: unsupported {construct} kept as paragraph text: {text}")]
    UnsupportedSyntax {
        line: usize,
        construct: &'static str,
        text: String,
    },
}

impl ParseDegraded {
    pub fn line(&self) -> usize {
        match self {
            ParseDegraded::UnterminatedFence { line }
            | ParseDegraded::UnsupportedSyntax { line, .. } => *line,
        }
    }
}
