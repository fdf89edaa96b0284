use std::collections::HashSet;

use super::types::{DECORATOR_CODE, DECORATOR_EM, DECORATOR_STRONG, PortableBlock};

/// Internal consistency failure in mapper output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapperInvariantViolation {
    #[error("block {block}: span {span} references undefined mark {mark}")]
    OrphanMark {
        block: String,
        span: String,
        mark: String,
    },

    #[error("block {block}: mark def {mark} is defined {count} times")]
    DuplicateMarkDef {
        block: String,
        mark: String,
        count: usize,
    },

    #[error("duplicate block key {key}")]
    DuplicateKey { key: String },
}

/// Checks the output is self-contained: unique block keys and every
/// annotation mark resolving to exactly one def in its own block.
pub fn validate(blocks: &[PortableBlock]) -> Result<(), MapperInvariantViolation> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for b in blocks {
        if !seen.insert(b.key()) {
            return Err(MapperInvariantViolation::DuplicateKey {
                key: b.key().to_string(),
            });
        }

        let PortableBlock::Text(t) = b else {
            continue;
        };
        for span in &t.children {
            for mark in &span.marks {
                if is_decorator(mark) {
                    continue;
                }
                let count = t.mark_defs.iter().filter(|d| d.key() == mark).count();
                match count {
                    1 => {}
                    0 => {
                        return Err(MapperInvariantViolation::OrphanMark {
                            block: t.key.clone(),
                            span: span.key.clone(),
                            mark: mark.clone(),
                        });
                    }
                    count => {
                        return Err(MapperInvariantViolation::DuplicateMarkDef {
                            block: t.key.clone(),
                            mark: mark.clone(),
                            count,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

fn is_decorator(mark: &str) -> bool {
    matches!(mark, DECORATOR_STRONG | DECORATOR_EM | DECORATOR_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portable::types::{BlockStyle, MarkDef, PortableSpan, TextBlock};
    use pretty_assertions::assert_eq;

    fn block(key: &str, marks: &[&str], defs: &[&str]) -> PortableBlock {
        PortableBlock::Text(TextBlock {
            key: key.into(),
            style: BlockStyle::Normal,
            list_item: None,
            level: None,
            children: vec![PortableSpan {
                key: format!("{key}-s0"),
                text: "t".into(),
                marks: marks.iter().map(|m| m.to_string()).collect(),
            }],
            mark_defs: defs
                .iter()
                .map(|k| MarkDef::Link {
                    key: k.to_string(),
                    href: "https://x.io".into(),
                })
                .collect(),
        })
    }

    #[test]
    fn valid_blocks_pass() {
        let blocks = vec![block("a", &["strong", "d1"], &["d1"]), block("b", &[], &[])];
        assert_eq!(validate(&blocks), Ok(()));
    }

    #[test]
    fn orphan_mark_is_rejected() {
        let blocks = vec![block("a", &["d1"], &[])];
        assert_eq!(
            validate(&blocks),
            Err(MapperInvariantViolation::OrphanMark {
                block: "a".into(),
                span: "a-s0".into(),
                mark: "d1".into(),
            })
        );
    }

    #[test]
    fn mark_def_in_another_block_does_not_count() {
        let blocks = vec![block("a", &[], &["d1"]), block("b", &["d1"], &[])];
        assert!(matches!(
            validate(&blocks),
            Err(MapperInvariantViolation::OrphanMark { block, .. }) if block == "b"
        ));
    }

    #[test]
    fn duplicate_mark_def_is_rejected() {
        let blocks = vec![block("a", &["d1"], &["d1", "d1"])];
        assert!(matches!(
            validate(&blocks),
            Err(MapperInvariantViolation::DuplicateMarkDef { count: 2, .. })
        ));
    }

    #[test]
    fn duplicate_block_key_is_rejected() {
        let blocks = vec![block("a", &[], &[]), block("a", &[], &[])];
        assert_eq!(
            validate(&blocks),
            Err(MapperInvariantViolation::DuplicateKey { key: "a".into() })
        );
    }
}
