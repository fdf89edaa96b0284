use std::time::Instant;

use log::debug;

use crate::{
    parsing::{
        ParseDegraded,
        blocks::{BuildOutput, build, tokenize},
        rope::SourceText,
    },
    portable::{MapperInvariantViolation, PortableBlock, content_hash, map, validate},
};

/// Result of one successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub blocks: Vec<PortableBlock>,
    pub warnings: Vec<ParseDegraded>,
    pub content_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("mapper invariant violated: {0}")]
    Invariant(#[from] MapperInvariantViolation),

    #[error("failed to serialize blocks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("conversion task failed: {0}")]
    Task(String),
}

/// Runs tokenize, build, map and validate over `text`.
pub fn convert_text(text: &str) -> Result<Conversion, ConversionError> {
    let started = Instant::now();
    let built = build(&tokenize(&SourceText::new(text)));
    finish_stages(text.len(), built, started)
}

/// Same stage chain, polling `superseded` between stages. `Ok(None)` means
/// the run was abandoned.
pub(crate) fn convert_cancellable(
    text: &str,
    superseded: impl Fn() -> bool,
) -> Result<Option<Conversion>, ConversionError> {
    let started = Instant::now();

    let tokens = tokenize(&SourceText::new(text));
    if superseded() {
        return Ok(None);
    }

    let built = build(&tokens);
    if superseded() {
        return Ok(None);
    }

    finish_stages(text.len(), built, started).map(Some)
}

fn finish_stages(
    input_len: usize,
    built: BuildOutput,
    started: Instant,
) -> Result<Conversion, ConversionError> {
    let blocks = map(&built.blocks);
    validate(&blocks)?;
    let hash = content_hash(&blocks)?;

    debug!(
        "converted {input_len} bytes into {} blocks in {:?}",
        blocks.len(),
        started.elapsed()
    );

    Ok(Conversion {
        blocks,
        warnings: built.warnings,
        content_hash: hash,
    })
}
