//! # Portable Blocks
//!
//! The output block schema and the deterministic mapping into it.
//!
//! - **`types`**: `PortableBlock` and its wire form
//! - **`keys`**: content-and-position derived keys
//! - **`mapper`**: block tree to `PortableBlock` sequence
//! - **`validate`**: self-containment checks (`MapperInvariantViolation`)

pub mod keys;
pub mod mapper;
pub mod types;
pub mod validate;

pub use mapper::map;
pub use types::{
    BlockStyle, CodeBlock, ImageBlock, ListItemKind, MarkDef, PortableBlock, PortableSpan,
    TextBlock,
};
pub use validate::{MapperInvariantViolation, validate};

/// BLAKE3 of the canonical JSON form, hex encoded.
///
/// Two block sequences hash equal exactly when their serialized bytes are
/// equal, keys included.
pub fn content_hash(blocks: &[PortableBlock]) -> Result<String, serde_json::Error> {
    let mut hasher = blake3::Hasher::new();
    serde_json::to_writer(&mut hasher, blocks)?;
    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{parse_document, rope::SourceText};

    fn hash_of(src: &str) -> String {
        content_hash(&map(&parse_document(&SourceText::new(src)).blocks)).unwrap()
    }

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        assert_eq!(hash_of("# A\n\nb"), hash_of("# A\n\nb"));
        assert_ne!(hash_of("# A\n\nb"), hash_of("# A\n\nc"));
        assert_eq!(hash_of("x").len(), 64);
    }

    #[test]
    fn empty_sequence_has_a_hash() {
        assert_eq!(content_hash(&[]).unwrap().len(), 64);
    }
}
