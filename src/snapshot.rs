//! Snapshot entity as supplied by the provider.

use chrono::{DateTime, Utc};

/// A point-in-time disk snapshot. Immutable once fetched; owned by the
/// caller for the duration of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Unique snapshot name.
    pub name: String,

    /// Creation timestamp reported by the provider.
    pub create_time: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, create_time: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            create_time,
        }
    }
}
