//! # Conversion Pipeline
//!
//! Raw text to portable blocks as one cancellable operation that drives the
//! live preview.
//!
//! - **`stages`**: the pure stage chain (`convert_text`)
//! - **`session`**: `ConversionPipeline`, the generation-ordered preview
//! - **`preview`**: `PreviewSnapshot`, `PreviewStatus`, `ConversionOutcome`
//!
//! Conversions share no mutable state beyond their own session, so
//! unrelated sessions can convert in parallel.

pub mod preview;
pub mod session;
pub mod stages;

pub use preview::{ConversionOutcome, PreviewSnapshot, PreviewStatus};
pub use session::{ConversionPipeline, ConversionTicket};
pub use stages::{Conversion, ConversionError, convert_text};
