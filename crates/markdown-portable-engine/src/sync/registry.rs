use serde::{Deserialize, Serialize};

/// Content a registered field accepts. Portable Text is the only kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    #[default]
    PortableText,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRegistryEntry {
    pub document_type: String,
    pub field_name: String,
    #[serde(default)]
    pub accepted_content_kind: ContentKind,
}

impl FieldRegistryEntry {
    pub fn portable_text(document_type: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            field_name: field_name.into(),
            accepted_content_kind: ContentKind::PortableText,
        }
    }
}

/// Allow-list of (document type, field) pairs that may receive blocks.
///
/// Built once and passed to the sync engine; there is no way to mutate it
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRegistry {
    entries: Vec<FieldRegistryEntry>,
}

impl FieldRegistry {
    /// Builds a registry, dropping duplicate entries but keeping first-seen order.
    pub fn new(entries: impl IntoIterator<Item = FieldRegistryEntry>) -> Self {
        let mut out: Vec<FieldRegistryEntry> = vec![];
        for e in entries {
            if !out.contains(&e) {
                out.push(e);
            }
        }
        Self { entries: out }
    }

    pub fn is_accepted(&self, document_type: &str, field_name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.document_type == document_type && e.field_name == field_name)
    }

    pub fn list_accepted_fields(&self) -> &[FieldRegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<FieldRegistryEntry> for FieldRegistry {
    fn from_iter<I: IntoIterator<Item = FieldRegistryEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn registry() -> FieldRegistry {
        FieldRegistry::new([
            FieldRegistryEntry::portable_text("log", "content"),
            FieldRegistryEntry::portable_text("post", "body"),
        ])
    }

    #[rstest]
    #[case("log", "content", true)]
    #[case("post", "body", true)]
    #[case("log", "body", false)]
    #[case("post", "content", false)]
    #[case("Log", "content", false)]
    #[case("", "", false)]
    fn acceptance(#[case] doc: &str, #[case] field: &str, #[case] expected: bool) {
        assert_eq!(registry().is_accepted(doc, field), expected);
    }

    #[test]
    fn lists_entries_in_order_without_duplicates() {
        let r: FieldRegistry = [
            FieldRegistryEntry::portable_text("b", "x"),
            FieldRegistryEntry::portable_text("a", "y"),
            FieldRegistryEntry::portable_text("b", "x"),
        ]
        .into_iter()
        .collect();
        let fields: Vec<_> = r
            .list_accepted_fields()
            .iter()
            .map(|e| (e.document_type.as_str(), e.field_name.as_str()))
            .collect();
        assert_eq!(fields, vec![("b", "x"), ("a", "y")]);
    }

    #[test]
    fn empty_registry_accepts_nothing() {
        let r = FieldRegistry::default();
        assert!(r.is_empty());
        assert!(!r.is_accepted("log", "content"));
    }

    #[test]
    fn entry_wire_form() {
        let e = FieldRegistryEntry::portable_text("log", "content");
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            serde_json::json!({
                "documentType": "log",
                "fieldName": "content",
                "acceptedContentKind": "portableText"
            })
        );
    }
}
