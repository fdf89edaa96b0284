use std::sync::Arc;

use crate::{parsing::ParseDegraded, portable::PortableBlock};

/// What the preview currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    /// The latest input produced no blocks.
    Empty,
    /// Blocks are the result of the latest committed conversion.
    Current,
    /// The latest conversion failed; blocks are the last good result.
    Degraded,
    /// Conversion failed and there is no good result to fall back to.
    Failed,
}

/// What happened to one submitted conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    Committed(PreviewStatus),
    /// A newer submission exists; the result was discarded.
    Superseded,
}

/// Immutable view of the preview state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PreviewSnapshot {
    /// Generation of the conversion that produced this state, 0 before any.
    pub generation: u64,
    pub status: PreviewStatus,
    pub blocks: Arc<[PortableBlock]>,
    pub warnings: Arc<[ParseDegraded]>,
    pub content_hash: Option<String>,
    /// Message of the failure behind `Degraded` / `Failed`.
    pub error: Option<String>,
}

impl PreviewSnapshot {
    pub fn initial() -> Self {
        Self {
            generation: 0,
            status: PreviewStatus::Empty,
            blocks: Arc::from(Vec::new()),
            warnings: Arc::from(Vec::new()),
            content_hash: None,
            error: None,
        }
    }
}

impl Default for PreviewSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}
