//! # Block Parsing
//!
//! Two phases, each with one job:
//!
//! 1. **Tokenize** (`classify`): every source line becomes exactly one `Token`
//!    carrying local facts only (kind, nesting level, marker-stripped text).
//!    Fence state is the only thing carried between lines.
//!
//! 2. **Build** (`builder`): `BlockBuilder` folds the token stream into a
//!    `BlockNode` tree, resolving list nesting from indent widths and running
//!    inline parsing on leaf text.
//!
//! ## Modules
//!
//! - **`kinds`**: per-construct syntax knowledge (markers, fences, headings)
//! - **`token`**: `Token` and `TokenKind`
//! - **`classify`**: `tokenize` and the line `Tokenizer`
//! - **`types`**: the closed `BlockNode` tree
//! - **`builder`**: `BlockBuilder` state machine
//!
//! ## Key Invariants
//!
//! - Fenced code is a raw zone: no block or inline parsing inside
//! - A list item is only ever a child of one list
//! - Malformed input degrades to paragraphs, never to an error

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod token;
pub mod types;

pub use builder::{BlockBuilder, BuildOutput, build};
pub use classify::{Tokenizer, tokenize};
pub use token::{Token, TokenKind};
pub use types::{BlockNode, ListBlock, ListItem};
