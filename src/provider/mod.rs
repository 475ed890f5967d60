//! Snapshot provider seam.
//!
//! The core never talks to a cloud API directly; it consumes this trait.
//! Provider-side concerns (name-prefix filtering, paging, auth) are
//! opaque to the engine.

use async_trait::async_trait;

use crate::snapshot::Snapshot;

pub mod gcp;

// Re-export commonly used types
pub use gcp::GcpProvider;

/// Lists and deletes snapshots.
#[async_trait]
pub trait SnapshotProvider {
    /// Return all snapshots in scope. The core calls this exactly once
    /// per invocation; a failure aborts the run before any decision is
    /// made.
    async fn list_snapshots(&self) -> anyhow::Result<Vec<Snapshot>>;

    /// Batch-delete snapshots by name. Called at most once per
    /// invocation; the core reports success or failure as one outcome
    /// even if the provider deletes name-by-name underneath.
    async fn delete_snapshots(&self, names: &[String]) -> anyhow::Result<()>;
}
