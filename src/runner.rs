//! One rotation run: list, evaluate, gate, delete.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::decision::DecisionSet;
use crate::gate::{self, GateDecision};
use crate::policy::RetentionPolicy;
use crate::provider::SnapshotProvider;
use crate::rotation::RotationEngine;

/// Result of a complete rotation run, handed to the CLI layer for
/// reporting. The name lists are lexicographically sorted.
#[derive(Debug, Clone)]
pub struct RotationRunResult {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total: usize,
    pub delete_names: Vec<String>,
    pub retained_names: Vec<String>,
    pub gate: GateDecision,
    /// Whether the delete call was actually issued (false under dry-run
    /// or when the gate blocks).
    pub deleted: bool,
}

/// Errors terminating a rotation run.
#[derive(Error, Debug)]
pub enum RotateError {
    /// The provider failed to enumerate snapshots; fatal, no partial
    /// decision is made.
    #[error("failed to list snapshots: {0}")]
    List(#[source] anyhow::Error),

    /// The provider failed during batch deletion. The decision report
    /// was already logged before the delete attempt.
    #[error("failed to delete snapshots: {0}")]
    Delete(#[source] anyhow::Error),
}

/// Drives one evaluation pass per invocation: fetch the snapshot list
/// once, run the four tier passes, apply the minimum-retained gate, and
/// issue at most one batch delete.
pub struct SnapshotRotator<P> {
    provider: P,
    policy: RetentionPolicy,
    dry_run: bool,
}

impl<P: SnapshotProvider + Sync> SnapshotRotator<P> {
    pub fn new(provider: P, policy: RetentionPolicy, dry_run: bool) -> Self {
        Self {
            provider,
            policy,
            dry_run,
        }
    }

    pub async fn run(&self) -> Result<RotationRunResult, RotateError> {
        let started_at = Utc::now();

        let snapshots = self
            .provider
            .list_snapshots()
            .await
            .map_err(RotateError::List)?;

        info!(
            total = snapshots.len(),
            dry_run = self.dry_run,
            "starting rotation run"
        );

        // The evaluation instant: captured once and reused across all
        // tier passes.
        let decisions: DecisionSet =
            RotationEngine::new(&self.policy).evaluate(&snapshots, started_at);

        let delete_names = decisions.sorted_names();
        let retained_names = decisions.retained_from(&snapshots);
        let gate = gate::authorize(snapshots.len(), delete_names.len(), &self.policy);

        // Log the full decision before any delete attempt so the report
        // survives a delete failure.
        info!(
            total = gate.total,
            marked = gate.marked,
            retained = gate.retained,
            minimum = gate.minimum,
            allowed = gate.allowed,
            "retention gate evaluated"
        );
        for name in &delete_names {
            info!(name = %name, "snapshot marked for deletion");
        }

        let mut deleted = false;
        if gate.allowed {
            if self.dry_run {
                info!(
                    count = delete_names.len(),
                    "[DRY RUN] deletion authorized but suppressed"
                );
            } else {
                self.provider
                    .delete_snapshots(&delete_names)
                    .await
                    .map_err(RotateError::Delete)?;
                deleted = true;
                info!(count = delete_names.len(), "snapshots deleted");
            }
        } else if !delete_names.is_empty() {
            warn!(
                retained = gate.retained,
                minimum = gate.minimum,
                "deletion blocked: would drop below the minimum-retained floor"
            );
        }

        Ok(RotationRunResult {
            started_at,
            completed_at: Utc::now(),
            total: gate.total,
            delete_names,
            retained_names,
            gate,
            deleted,
        })
    }
}
