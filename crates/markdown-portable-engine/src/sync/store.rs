use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::error::StoreError;

/// Opaque token identifying a document's current state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Revision {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDocument {
    pub id: String,
    pub revision: Revision,
}

/// The narrow slice of a remote document store the sync engine depends on.
///
/// `patch_field` must only touch the named field. When `expected_revision`
/// is given and differs from the current one, the store must refuse with
/// `StoreError::Conflict`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn create_document(
        &self,
        document_type: &str,
        fields: Map<String, Value>,
    ) -> Result<CreatedDocument, StoreError>;

    async fn patch_field(
        &self,
        id: &str,
        field_name: &str,
        value: Value,
        expected_revision: Option<&Revision>,
    ) -> Result<Revision, StoreError>;

    async fn current_revision(&self, id: &str) -> Result<Revision, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub document_type: String,
    pub version: u64,
    pub fields: Map<String, Value>,
}

impl StoredDocument {
    pub fn revision(&self) -> Revision {
        Revision(format!("rev-{}", self.version))
    }
}

/// Per-method call counts, taken at call entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub creates: usize,
    pub patches: usize,
    pub revision_reads: usize,
}

impl StoreCalls {
    pub fn total(&self) -> usize {
        self.creates + self.patches + self.revision_reads
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    docs: BTreeMap<String, StoredDocument>,
    next_id: u64,
    calls: StoreCalls,
    latency: Duration,
    unavailable: bool,
}

/// In-process `ContentStore`. Revisions are `rev-<version>`, new documents
/// start at version 1 and every write bumps it.
///
/// Clones share state, so a test can keep a handle while the engine owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document with an explicit id and version.
    pub async fn insert_document(
        &self,
        id: impl Into<String>,
        document_type: impl Into<String>,
        version: u64,
        fields: Map<String, Value>,
    ) {
        self.state.lock().await.docs.insert(
            id.into(),
            StoredDocument {
                document_type: document_type.into(),
                version,
                fields,
            },
        );
    }

    pub async fn document(&self, id: &str) -> Option<StoredDocument> {
        self.state.lock().await.docs.get(id).cloned()
    }

    pub async fn calls(&self) -> StoreCalls {
        self.state.lock().await.calls
    }

    /// Delay applied to every call before it touches state.
    pub async fn set_latency(&self, latency: Duration) {
        self.state.lock().await.latency = latency;
    }

    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().await.unavailable = unavailable;
    }

    /// Counts the call, waits out the latency and checks availability.
    async fn enter(&self, count: impl FnOnce(&mut StoreCalls)) -> Result<(), StoreError> {
        let latency = {
            let mut s = self.state.lock().await;
            count(&mut s.calls);
            s.latency
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if self.state.lock().await.unavailable {
            return Err(StoreError::Unavailable("in-memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn create_document(
        &self,
        document_type: &str,
        fields: Map<String, Value>,
    ) -> Result<CreatedDocument, StoreError> {
        self.enter(|c| c.creates += 1).await?;
        let mut s = self.state.lock().await;
        s.next_id += 1;
        let id = format!("{document_type}-{}", s.next_id);
        let doc = StoredDocument {
            document_type: document_type.to_string(),
            version: 1,
            fields,
        };
        let revision = doc.revision();
        s.docs.insert(id.clone(), doc);
        Ok(CreatedDocument { id, revision })
    }

    async fn patch_field(
        &self,
        id: &str,
        field_name: &str,
        value: Value,
        expected_revision: Option<&Revision>,
    ) -> Result<Revision, StoreError> {
        self.enter(|c| c.patches += 1).await?;
        let mut s = self.state.lock().await;
        let doc = s
            .docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let actual = doc.revision();
        match expected_revision {
            Some(expected) if *expected != actual => {
                return Err(StoreError::Conflict {
                    expected: expected.clone(),
                    actual,
                });
            }
            _ => {}
        }

        doc.fields.insert(field_name.to_string(), value);
        doc.version += 1;
        Ok(doc.revision())
    }

    async fn current_revision(&self, id: &str) -> Result<Revision, StoreError> {
        self.enter(|c| c.revision_reads += 1).await?;
        self.state
            .lock()
            .await
            .docs
            .get(id)
            .map(StoredDocument::revision)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
