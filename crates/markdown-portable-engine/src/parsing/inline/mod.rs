//! # Inline Parsing
//!
//! The second tokenization pass, run over the text of one block at a time
//! (paragraphs, headings, quotes, list items) once block boundaries are
//! fixed, so inline markers can never cross a block boundary.
//!
//! ## Modules
//!
//! - **`kinds`**: syntax owners for code spans, emphasis, links, bare URLs
//! - **`cursor`**: `Cursor` for byte-range scanning
//! - **`lexer`**: `tokenize()` producing `InlineToken`s
//! - **`spans`**: delimiter pairing and `InlineSpan` construction
//! - **`types`**: token, span and mark types
//!
//! ## Raw Zone Precedence
//!
//! Code spans are raw zones: `` `**x**` `` is a single code span, not bold.

pub mod cursor;
pub mod kinds;
pub mod lexer;
pub mod spans;
pub mod types;

pub use lexer::tokenize;
pub use spans::{build_spans, parse_inline, standalone_image};
pub use types::{DelimKind, InlineSpan, InlineToken, InlineTokenKind, Mark};
