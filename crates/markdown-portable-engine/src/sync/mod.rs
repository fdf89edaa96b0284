//! # Sync
//!
//! Pushes converted blocks into a remote content store.
//!
//! - **`registry`**: `FieldRegistry`, the allow-list consulted before any I/O
//! - **`store`**: the `ContentStore` contract and `InMemoryStore`
//! - **`audit`**: `SyncAttempt` records and the append-only `AuditSink`s
//! - **`engine`**: `SyncEngine`, tying the three together
//! - **`error`**: `SyncError`, `StoreError`, `AuditError`
//!
//! ## Guarantees
//!
//! - Unregistered targets fail with `UnsupportedTarget` without calling the store
//! - Patches write only the requested field
//! - A stale `expected_revision` fails with `RevisionConflict` and writes nothing
//! - Re-syncing the last content written to a field is a no-op while the remote is unchanged
//! - A create cannot carry an expected revision (`InvalidRequest`)
//! - One in-flight sync per target; a second gets `SyncInProgress`
//! - Every attempt appends exactly one audit record

pub mod audit;
pub mod engine;
pub mod error;
pub mod registry;
pub mod store;

pub use audit::{AuditSink, JsonLinesAuditLog, MemoryAuditLog, SyncAttempt, SyncOperation};
pub use engine::{DEFAULT_TIMEOUT, SyncEngine, SyncOutcome, SyncRequest};
pub use error::{AuditError, StoreError, SyncError};
pub use registry::{ContentKind, FieldRegistry, FieldRegistryEntry};
pub use store::{ContentStore, CreatedDocument, InMemoryStore, Revision, StoreCalls, StoredDocument};
