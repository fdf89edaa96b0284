use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};
use uuid::Uuid;

use super::error::AuditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOperation {
    Create,
    Update,
}

/// One sync attempt. Written once, never updated; retries add new records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAttempt {
    pub id: Uuid,
    pub operation: SyncOperation,
    pub document_type: String,
    /// For creates, the new id when the create succeeded.
    pub document_id: Option<String>,
    pub field_name: String,
    pub content_hash: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Append-only destination for sync attempts. Nothing reads back through it.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, attempt: SyncAttempt) -> Result<(), AuditError>;
}

/// Keeps records in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLog {
    records: Arc<Mutex<Vec<SyncAttempt>>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<SyncAttempt> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditLog {
    async fn append(&self, attempt: SyncAttempt) -> Result<(), AuditError> {
        self.records.lock().await.push(attempt);
        Ok(())
    }
}

/// One JSON record per line, appended to a file.
#[derive(Debug)]
pub struct JsonLinesAuditLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesAuditLog {
    /// Creates the parent directory if needed. The file itself is created on
    /// first append.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let path = path.into();
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                tokio::fs::create_dir_all(parent).await?;
            }
            _ => {}
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditSink for JsonLinesAuditLog {
    async fn append(&self, attempt: SyncAttempt) -> Result<(), AuditError> {
        let mut line = serde_json::to_vec(&attempt)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
