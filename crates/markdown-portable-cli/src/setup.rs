//! Builds sync components from the loaded configuration.

use anyhow::{Context, Result};
use markdown_portable_config::Config;
use markdown_portable_engine::sync::{
    ContentStore, FieldRegistry, FieldRegistryEntry, JsonLinesAuditLog, SyncEngine,
};
use std::sync::Arc;

pub fn registry(config: &Config) -> FieldRegistry {
    config
        .fields
        .iter()
        .map(|f| FieldRegistryEntry::portable_text(&f.document_type, &f.field_name))
        .collect()
}

/// A sync engine over `store`, gated by the configured fields, bounded by the
/// configured timeout and auditing to the configured JSON-lines file.
pub async fn sync_engine<S: ContentStore>(
    config: &Config,
    store: S,
) -> Result<SyncEngine<S, JsonLinesAuditLog>> {
    let audit_path = config.audit_log_path();
    let audit = JsonLinesAuditLog::open(&audit_path)
        .await
        .with_context(|| format!("Failed to open audit log {}", audit_path.display()))?;

    Ok(SyncEngine::new(store, audit, Arc::new(registry(config)))
        .with_timeout(config.sync.timeout()))
}
