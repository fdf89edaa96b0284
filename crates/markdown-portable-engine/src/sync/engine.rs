use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chrono::Utc;
use log::{debug, error, info, warn};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::portable::{PortableBlock, content_hash};

use super::{
    audit::{AuditSink, SyncAttempt, SyncOperation},
    error::SyncError,
    registry::FieldRegistry,
    store::{ContentStore, Revision},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A request to write blocks into one document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub document_type: String,
    /// `None` creates a new document.
    pub document_id: Option<String>,
    pub field_name: String,
    pub blocks: Vec<PortableBlock>,
    pub expected_revision: Option<Revision>,
}

impl SyncRequest {
    pub fn create(
        document_type: impl Into<String>,
        field_name: impl Into<String>,
        blocks: Vec<PortableBlock>,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            document_id: None,
            field_name: field_name.into(),
            blocks,
            expected_revision: None,
        }
    }

    pub fn patch(
        document_type: impl Into<String>,
        document_id: impl Into<String>,
        field_name: impl Into<String>,
        blocks: Vec<PortableBlock>,
    ) -> Self {
        Self {
            document_id: Some(document_id.into()),
            ..Self::create(document_type, field_name, blocks)
        }
    }

    /// Refuse to write unless the remote is still at `revision`.
    pub fn expecting(mut self, revision: impl Into<Revision>) -> Self {
        self.expected_revision = Some(revision.into());
        self
    }

    pub fn operation(&self) -> SyncOperation {
        match self.document_id {
            Some(_) => SyncOperation::Update,
            None => SyncOperation::Create,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub operation: SyncOperation,
    pub document_id: String,
    pub revision: Revision,
    pub content_hash: String,
    /// The same content was already written and nothing changed since.
    pub already_applied: bool,
}

/// One sync target: at most one request per target is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TargetKey {
    document_type: String,
    document_id: Option<String>,
    field_name: String,
}

impl TargetKey {
    fn of(req: &SyncRequest) -> Self {
        Self {
            document_type: req.document_type.clone(),
            document_id: req.document_id.clone(),
            field_name: req.field_name.clone(),
        }
    }
}

/// An existing document field. Holds only the latest write we made to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AppliedKey {
    document_type: String,
    document_id: String,
    field_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Applied {
    content_hash: String,
    revision: Revision,
}

/// Holds a target in the in-flight set until dropped, including when the
/// sync future is dropped by a timeout.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<TargetKey>>,
    key: TargetKey,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a Mutex<HashSet<TargetKey>>, key: TargetKey) -> Option<Self> {
        let inserted = set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());
        inserted.then_some(Self { set, key })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Registry-gated, audited writes of portable blocks into a content store.
///
/// Every call to `sync` appends exactly one `SyncAttempt`, whatever the
/// outcome.
pub struct SyncEngine<S, A> {
    store: S,
    audit: A,
    registry: Arc<FieldRegistry>,
    timeout: Duration,
    in_flight: Mutex<HashSet<TargetKey>>,
    applied: Mutex<HashMap<AppliedKey, Applied>>,
}

impl<S: ContentStore, A: AuditSink> SyncEngine<S, A> {
    pub fn new(store: S, audit: A, registry: Arc<FieldRegistry>) -> Self {
        Self {
            store,
            audit,
            registry,
            timeout: DEFAULT_TIMEOUT,
            in_flight: Mutex::new(HashSet::new()),
            applied: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn sync(&self, req: &SyncRequest) -> Result<SyncOutcome, SyncError> {
        let hash = content_hash(&req.blocks).map_err(|e| SyncError::Encode(e.to_string()));
        let result = match &hash {
            Ok(hash) => self.run(req, hash).await,
            Err(e) => Err(e.clone()),
        };

        match &result {
            Ok(o) if o.already_applied => debug!(
                "{}.{} on {} already at {}",
                req.document_type, req.field_name, o.document_id, o.revision
            ),
            Ok(o) => info!(
                "synced {}.{} on {} to {}",
                req.document_type, req.field_name, o.document_id, o.revision
            ),
            Err(e) => warn!("sync of {}.{} failed: {e}", req.document_type, req.field_name),
        }

        self.record(req, hash.unwrap_or_default(), &result).await;
        result
    }

    async fn run(&self, req: &SyncRequest, hash: &str) -> Result<SyncOutcome, SyncError> {
        if !self.registry.is_accepted(&req.document_type, &req.field_name) {
            return Err(SyncError::UnsupportedTarget {
                document_type: req.document_type.clone(),
                field_name: req.field_name.clone(),
            });
        }
        if req.document_id.is_none() && req.expected_revision.is_some() {
            return Err(SyncError::InvalidRequest(
                "a create cannot expect a revision".to_string(),
            ));
        }

        let _guard = InFlightGuard::acquire(&self.in_flight, TargetKey::of(req))
            .ok_or(SyncError::SyncInProgress)?;

        let write = async {
            match &req.document_id {
                None => self.create(req, hash).await,
                Some(id) => self.patch(req, id, hash).await,
            }
        };
        tokio::time::timeout(self.timeout, write)
            .await
            .map_err(|_| SyncError::Timeout(self.timeout))?
    }

    async fn create(&self, req: &SyncRequest, hash: &str) -> Result<SyncOutcome, SyncError> {
        let mut fields = Map::new();
        fields.insert(req.field_name.clone(), encode(&req.blocks)?);

        let created = self
            .store
            .create_document(&req.document_type, fields)
            .await?;

        self.remember(req, &created.id, hash, created.revision.clone());
        Ok(SyncOutcome {
            operation: SyncOperation::Create,
            document_id: created.id,
            revision: created.revision,
            content_hash: hash.to_string(),
            already_applied: false,
        })
    }

    async fn patch(
        &self,
        req: &SyncRequest,
        id: &str,
        hash: &str,
    ) -> Result<SyncOutcome, SyncError> {
        let applied = self.applied_revision(req, id, hash);

        let current = if applied.is_some() || req.expected_revision.is_some() {
            Some(self.store.current_revision(id).await?)
        } else {
            None
        };

        match (&applied, &current) {
            (Some(applied), Some(current)) if applied == current => {
                return Ok(SyncOutcome {
                    operation: SyncOperation::Update,
                    document_id: id.to_string(),
                    revision: current.clone(),
                    content_hash: hash.to_string(),
                    already_applied: true,
                });
            }
            _ => {}
        }

        match (&req.expected_revision, current) {
            (Some(expected), Some(actual)) if *expected != actual => {
                return Err(SyncError::RevisionConflict {
                    expected: expected.clone(),
                    actual,
                });
            }
            _ => {}
        }

        let revision = self
            .store
            .patch_field(
                id,
                &req.field_name,
                encode(&req.blocks)?,
                req.expected_revision.as_ref(),
            )
            .await?;

        self.remember(req, id, hash, revision.clone());
        Ok(SyncOutcome {
            operation: SyncOperation::Update,
            document_id: id.to_string(),
            revision,
            content_hash: hash.to_string(),
            already_applied: false,
        })
    }

    fn applied_key(req: &SyncRequest, id: &str) -> AppliedKey {
        AppliedKey {
            document_type: req.document_type.clone(),
            document_id: id.to_string(),
            field_name: req.field_name.clone(),
        }
    }

    /// The revision our last write of `hash` produced, if that is still the
    /// latest content we wrote to this field.
    fn applied_revision(&self, req: &SyncRequest, id: &str, hash: &str) -> Option<Revision> {
        self.applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Self::applied_key(req, id))
            .filter(|a| a.content_hash == hash)
            .map(|a| a.revision.clone())
    }

    fn remember(&self, req: &SyncRequest, id: &str, hash: &str, revision: Revision) {
        self.applied.lock().unwrap_or_else(PoisonError::into_inner).insert(
            Self::applied_key(req, id),
            Applied {
                content_hash: hash.to_string(),
                revision,
            },
        );
    }

    /// Audit failures are logged and never replace the sync result.
    async fn record(
        &self,
        req: &SyncRequest,
        content_hash: String,
        result: &Result<SyncOutcome, SyncError>,
    ) {
        let attempt = SyncAttempt {
            id: Uuid::new_v4(),
            operation: req.operation(),
            document_type: req.document_type.clone(),
            document_id: match result {
                Ok(o) => Some(o.document_id.clone()),
                Err(_) => req.document_id.clone(),
            },
            field_name: req.field_name.clone(),
            content_hash,
            success: result.is_ok(),
            error: result.as_ref().err().map(ToString::to_string),
            timestamp: Utc::now(),
        };
        let id = attempt.id;

        match tokio::time::timeout(self.timeout, self.audit.append(attempt)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("failed to append sync attempt {id}: {e}"),
            Err(_) => error!("appending sync attempt {id} timed out"),
        }
    }
}

fn encode(blocks: &[PortableBlock]) -> Result<Value, SyncError> {
    serde_json::to_value(blocks).map_err(|e| SyncError::Encode(e.to_string()))
}
