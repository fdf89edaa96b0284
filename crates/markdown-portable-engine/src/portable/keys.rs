//! Deterministic keys.
//!
//! Keys are a pure function of position, kind and content, so converting
//! unchanged text yields identical keys in any process. No counters, no
//! clocks, no per-process hash seeds.

pub const KEY_LEN: usize = 12;

pub fn block_key(position: usize, kind: &str, content: &str) -> String {
    let mut h = blake3::Hasher::new();
    h.update(&(position as u64).to_le_bytes());
    h.update(kind.as_bytes());
    h.update(&[0]);
    h.update(content.as_bytes());
    short(h.finalize())
}

/// Key for a span or mark def, scoped to its owning block.
pub fn child_key(parent: &str, kind: &str, index: usize, content: &str) -> String {
    let mut h = blake3::Hasher::new();
    h.update(parent.as_bytes());
    h.update(&[0]);
    h.update(kind.as_bytes());
    h.update(&(index as u64).to_le_bytes());
    h.update(content.as_bytes());
    short(h.finalize())
}

fn short(hash: blake3::Hash) -> String {
    hash.to_hex().as_str()[..KEY_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_short_lowercase_hex() {
        let k = block_key(0, "block", "hello");
        assert_eq!(k.len(), KEY_LEN);
        assert!(k.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn keys_are_stable() {
        assert_eq!(block_key(3, "code", "x"), block_key(3, "code", "x"));
        assert_eq!(child_key("p", "span", 1, "t"), child_key("p", "span", 1, "t"));
    }

    #[test]
    fn position_kind_and_content_all_matter() {
        let base = block_key(0, "block", "a");
        assert_ne!(base, block_key(1, "block", "a"));
        assert_ne!(base, block_key(0, "code", "a"));
        assert_ne!(base, block_key(0, "block", "b"));
    }

    #[test]
    fn kind_and_content_boundary_is_unambiguous() {
        assert_ne!(block_key(0, "ab", "c"), block_key(0, "a", "bc"));
    }
}
