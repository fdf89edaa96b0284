//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters. The lexer calls
//! these; it never hardcodes `**`, `[` or `` ` `` itself.

pub mod autolink;
pub mod code_span;
pub mod emphasis;
pub mod link;

pub use autolink::AutoLink;
pub use code_span::CodeSpan;
pub use emphasis::{Emphasis, Flanking};
pub use link::{Link, LinkParts};
