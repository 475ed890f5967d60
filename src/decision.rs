//! The deletion decision set and its materialization for reporting and
//! the batch delete call.

use std::collections::BTreeSet;

use crate::snapshot::Snapshot;

/// Snapshot names slated for deletion after all tier passes.
///
/// Built fresh per invocation and owned by the caller of
/// [`crate::rotation::RotationEngine::evaluate`]; no state persists
/// between runs. Membership only: once a name is marked it stays marked
/// for the rest of the invocation (union semantics across tier passes).
/// A `BTreeSet` keeps names unique and yields them in lexicographic
/// order, which makes the materialized lists deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecisionSet {
    marked: BTreeSet<String>,
}

impl DecisionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a snapshot name for deletion. Returns `true` if it was not
    /// already marked.
    pub fn mark(&mut self, name: &str) -> bool {
        self.marked.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.marked.contains(name)
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// The marked names, lexicographically sorted.
    pub fn sorted_names(&self) -> Vec<String> {
        self.marked.iter().cloned().collect()
    }

    /// The names of `snapshots` that are not marked, lexicographically
    /// sorted. Used for the retained-list report.
    pub fn retained_from(&self, snapshots: &[Snapshot]) -> Vec<String> {
        let mut retained: Vec<String> = snapshots
            .iter()
            .filter(|s| !self.marked.contains(&s.name))
            .map(|s| s.name.clone())
            .collect();
        retained.sort();
        retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_mark_is_idempotent() {
        let mut set = DecisionSet::new();
        assert!(set.mark("snap-b"));
        assert!(!set.mark("snap-b"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_sorted_names_regardless_of_insertion_order() {
        let mut set = DecisionSet::new();
        set.mark("snap-c");
        set.mark("snap-a");
        set.mark("snap-b");
        assert_eq!(set.sorted_names(), vec!["snap-a", "snap-b", "snap-c"]);
    }

    #[test]
    fn test_retained_is_sorted_set_difference() {
        let now = Utc::now();
        let snapshots = vec![
            Snapshot::new("snap-c", now),
            Snapshot::new("snap-a", now),
            Snapshot::new("snap-b", now),
        ];

        let mut set = DecisionSet::new();
        set.mark("snap-b");

        assert_eq!(set.retained_from(&snapshots), vec!["snap-a", "snap-c"]);
    }
}
