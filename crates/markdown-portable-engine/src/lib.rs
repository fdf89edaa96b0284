//! Markdown to Portable Text conversion, live-preview pipeline and
//! registry-gated content-store sync.

pub mod parsing;
pub mod pipeline;
pub mod portable;
pub mod sync;

// Re-export key types for easier usage
pub use parsing::{ParseDegraded, ParsedDoc, parse_document, rope::SourceText};
pub use pipeline::{
    Conversion, ConversionError, ConversionOutcome, ConversionPipeline, PreviewSnapshot,
    PreviewStatus, convert_text,
};
pub use portable::{MapperInvariantViolation, PortableBlock, content_hash};
pub use sync::{
    FieldRegistry, FieldRegistryEntry, SyncAttempt, SyncEngine, SyncError, SyncOutcome,
    SyncRequest,
};
