//! snaprotate library
//!
//! Decides, for a set of point-in-time disk snapshots, which to retain and
//! which to delete according to a tiered (grandfather-father-son) retention
//! policy with calendar-aligned rotation boundaries.
//!
//! The decision core is pure and synchronous: [`rotation::RotationEngine`]
//! classifies every snapshot against four nested time tiers and produces a
//! [`DecisionSet`], and [`gate::authorize`] applies the minimum-retained
//! safety floor. I/O lives behind the [`provider::SnapshotProvider`] seam;
//! [`runner::SnapshotRotator`] wires the two together for one evaluation
//! pass per invocation.

pub mod config;
pub mod decision;
pub mod gate;
pub mod policy;
pub mod provider;
pub mod rotation;
pub mod runner;
pub mod snapshot;

// Re-export commonly used types
pub use config::Config;
pub use decision::DecisionSet;
pub use gate::{GateDecision, authorize};
pub use policy::{PolicyError, RetentionPolicy};
pub use provider::{GcpProvider, SnapshotProvider};
pub use rotation::{RotationEngine, Tier};
pub use runner::{RotateError, RotationRunResult, SnapshotRotator};
pub use snapshot::Snapshot;
