//! Minimum-retained safety gate.

use crate::policy::RetentionPolicy;

/// Outcome of the retention gate, reported regardless of whether the
/// deletion is authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Whether the deletion may proceed.
    pub allowed: bool,
    /// Total snapshots evaluated.
    pub total: usize,
    /// Snapshots marked for deletion.
    pub marked: usize,
    /// Snapshots that would remain after deletion.
    pub retained: usize,
    /// The configured floor, carried along for reporting.
    pub minimum: usize,
}

/// Authorize or block the deletion. All-or-nothing: if deleting would
/// drop the retained count below `policy.minimum`, nothing is deleted at
/// all (no partial trim down to the floor). An empty deletion set is
/// never authorized.
pub fn authorize(total: usize, marked: usize, policy: &RetentionPolicy) -> GateDecision {
    let retained = total.saturating_sub(marked);
    let allowed = marked > 0 && retained >= policy.minimum;

    GateDecision {
        allowed,
        total,
        marked,
        retained,
        minimum: policy.minimum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_with_minimum(minimum: usize) -> RetentionPolicy {
        RetentionPolicy {
            minimum,
            ..RetentionPolicy::default()
        }
    }

    #[test]
    fn test_allows_when_floor_is_kept() {
        let decision = authorize(30, 18, &policy_with_minimum(10));
        assert!(decision.allowed);
        assert_eq!(decision.retained, 12);
    }

    #[test]
    fn test_blocks_when_floor_would_be_broken() {
        let decision = authorize(30, 21, &policy_with_minimum(10));
        assert!(!decision.allowed);
        assert_eq!(decision.retained, 9);
    }

    #[test]
    fn test_allows_exactly_at_floor() {
        let decision = authorize(30, 20, &policy_with_minimum(10));
        assert!(decision.allowed);
        assert_eq!(decision.retained, 10);
    }

    #[test]
    fn test_empty_deletion_set_is_never_authorized() {
        let decision = authorize(30, 0, &policy_with_minimum(0));
        assert!(!decision.allowed);
        assert_eq!(decision.retained, 30);
    }
}
