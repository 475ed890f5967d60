//! Rotation decision engine.
//!
//! - `tier`: the four retention tiers and their age windows
//! - `calendar`: explicit calendar-date helpers for boundary tests
//! - `engine`: union-of-independent-tier-passes evaluation

pub mod calendar;
pub mod engine;
pub mod tier;

// Re-export commonly used types
pub use engine::RotationEngine;
pub use tier::Tier;
