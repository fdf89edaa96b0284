//! # Parsing
//!
//! Raw Markdown to a block tree. Never fails: anything outside the supported
//! subset degrades to paragraph text and is reported as a `ParseDegraded`.

pub mod blocks;
pub mod inline;
pub mod invariants;
pub mod rope;
pub mod warnings;

use log::debug;

use blocks::{BlockNode, build, tokenize};
use rope::SourceText;

pub use warnings::ParseDegraded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
    pub warnings: Vec<ParseDegraded>,
}

pub fn parse_document(source: &SourceText) -> ParsedDoc {
    let tokens = tokenize(source);
    let out = build(&tokens);
    debug!(
        "parsed {} lines into {} blocks ({} warnings)",
        tokens.len(),
        out.blocks.len(),
        out.warnings.len()
    );
    ParsedDoc {
        blocks: out.blocks,
        warnings: out.warnings,
    }
}
