//! Union-of-independent-tier-passes evaluation.
//!
//! Every tier independently scans the **full** snapshot list, not the
//! survivors of the previous tier: a snapshot that one tier exempts as a
//! rotation boundary can still be marked by a later, longer-window tier,
//! and no tier ever unmarks a name. The resulting decision set is the
//! union of the per-tier passes ("delete if any applicable tier says
//! so"). This mirrors the retention semantics the policy was written
//! against, made explicit here rather than left as a side effect of
//! shared state.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::decision::DecisionSet;
use crate::policy::RetentionPolicy;
use crate::rotation::tier::Tier;
use crate::snapshot::Snapshot;

/// Evaluates the four tier passes over a snapshot list.
pub struct RotationEngine<'a> {
    policy: &'a RetentionPolicy,
}

impl<'a> RotationEngine<'a> {
    pub fn new(policy: &'a RetentionPolicy) -> Self {
        Self { policy }
    }

    /// Run all four tier passes and return the union deletion set.
    ///
    /// `now` is the evaluation instant, captured once by the caller and
    /// reused across all passes so wall-clock drift during a long pass
    /// cannot skew the cutoffs. Pure and idempotent: identical inputs
    /// and `now` produce an identical set. O(snapshots × tiers).
    pub fn evaluate(&self, snapshots: &[Snapshot], now: DateTime<Utc>) -> DecisionSet {
        let mut decisions = DecisionSet::new();

        for tier in Tier::ALL {
            let cutoff = now - self.policy.max_age(tier);
            debug!(tier = %tier, cutoff = %cutoff, "running tier pass");

            for snapshot in snapshots {
                // Only snapshots strictly older than the tier window are
                // candidates under this pass.
                if snapshot.create_time >= cutoff {
                    continue;
                }

                if tier.next().is_some()
                    && self.policy.is_rotation_boundary(snapshot.create_time, tier)
                {
                    debug!(
                        name = %snapshot.name,
                        tier = %tier,
                        "snapshot on rotation boundary, promoted"
                    );
                    continue;
                }

                if decisions.mark(&snapshot.name) {
                    debug!(name = %snapshot.name, tier = %tier, "snapshot marked for deletion");
                }
            }
        }

        decisions
    }
}
