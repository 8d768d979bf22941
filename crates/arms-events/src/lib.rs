//! Shared decision and report types for the arms-race simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod choice;
pub mod decision;
pub mod report;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export choice types
pub use choice::ActionChoice;

// Re-export decision types
pub use decision::{CooperationSummary, DecisionRecord, ResponseOutlook, RoundSummary};

// Re-export report types
pub use report::{generate_phase_id, generate_run_id, PhaseReport, RunReport};
